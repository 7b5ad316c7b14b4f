//! Page context
//!
//! The widget is only offered on pages the backend can fetch. Resolving a
//! page also looks up a human readable title for the popup's document
//! memory.

use pagechat_widget::Page;
use reqwest::redirect::Policy;
use scraper::{Html, Selector};
use std::time::Duration;
use url::Url;

use crate::error::CoreError;
use crate::Result;

const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    url: String,
    title: Option<String>,
}

impl PageContext {
    /// Accept `url` if it is an http(s) page.
    pub fn new(url: &str) -> Result<Self> {
        let trimmed = url.trim();
        let parsed = Url::parse(trimmed)?;
        if !is_accessible(&parsed) {
            return Err(CoreError::InaccessiblePage(trimmed.to_string()));
        }

        Ok(Self {
            url: trimmed.to_string(),
            title: None,
        })
    }

    /// Like [`new`](Self::new) but also fetches the page title. A failed
    /// fetch is logged and leaves the title unset.
    pub async fn resolve(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut page = Self::new(url)?;

        match fetch_title(&page.url, timeout.unwrap_or(FETCH_TIMEOUT)).await {
            Ok(title) => page.title = title,
            Err(e) => {
                tracing::warn!(url = %page.url, error = %e, "Failed to fetch page title");
            }
        }

        Ok(page)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn to_page(&self) -> Page {
        Page {
            url: self.url.clone(),
            title: self.title.clone(),
        }
    }
}

fn is_accessible(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

async fn fetch_title(url: &str, timeout: Duration) -> std::result::Result<Option<String>, reqwest::Error> {
    let client = reqwest::Client::builder()
        .redirect(Policy::limited(5))
        .timeout(timeout)
        .user_agent("Mozilla/5.0 (pagechat)")
        .build()?;

    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    Ok(extract_title(&Html::parse_document(&body)))
}

fn extract_title(doc: &Html) -> Option<String> {
    for selector in ["meta[property='og:title']", "meta[name='twitter:title']"] {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        for el in doc.select(&sel) {
            if let Some(content) = el.value().attr("content") {
                let cleaned = normalize_whitespace(content);
                if !cleaned.is_empty() {
                    return Some(cleaned);
                }
            }
        }
    }

    if let Ok(sel) = Selector::parse("title") {
        for el in doc.select(&sel) {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let cleaned = normalize_whitespace(&text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        }
    }

    // Short headings are usually navigation, not the document name
    if let Ok(sel) = Selector::parse("h1") {
        for el in doc.select(&sel) {
            let text = el.text().collect::<Vec<_>>().join(" ");
            let cleaned = normalize_whitespace(&text);
            if cleaned.len() >= 6 {
                return Some(cleaned);
            }
        }
    }

    None
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_accessibility_gate() {
        assert!(PageContext::new("https://example.com/a?b=c").is_ok());
        assert!(PageContext::new("  http://localhost:8080  ").is_ok());

        assert!(matches!(
            PageContext::new("chrome://extensions"),
            Err(CoreError::InaccessiblePage(_))
        ));
        assert!(matches!(
            PageContext::new("file:///etc/hosts"),
            Err(CoreError::InaccessiblePage(_))
        ));
        assert!(matches!(
            PageContext::new("example.com"),
            Err(CoreError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_url_is_kept_verbatim() {
        let page = PageContext::new("https://example.com").unwrap();
        assert_eq!(page.url(), "https://example.com");
        assert_eq!(page.to_page().display_title(), "Document");
    }

    #[test]
    fn test_title_preference() {
        let doc = Html::parse_document(
            r#"<html><head>
                <title>Plain   Title</title>
                <meta property="og:title" content="  Open Graph Title ">
            </head><body><h1>Heading text</h1></body></html>"#,
        );
        assert_eq!(extract_title(&doc).as_deref(), Some("Open Graph Title"));

        let doc = Html::parse_document("<title>\n  Plain\n Title </title>");
        assert_eq!(extract_title(&doc).as_deref(), Some("Plain Title"));

        let doc = Html::parse_document("<body><h1>Menu</h1><h1>Annual Report 2024</h1></body>");
        assert_eq!(extract_title(&doc).as_deref(), Some("Annual Report 2024"));

        let doc = Html::parse_document("<body><p>nothing</p></body>");
        assert_eq!(extract_title(&doc), None);
    }

    #[tokio::test]
    async fn test_resolve_fetches_title() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string("<html><head><title>An Article</title></head></html>"),
            )
            .mount(&server)
            .await;

        let url = format!("{}/article", server.uri());
        let page = PageContext::resolve(&url, None).await.unwrap();
        assert_eq!(page.url(), url);
        assert_eq!(page.title(), Some("An Article"));
    }

    #[tokio::test]
    async fn test_resolve_survives_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let page = PageContext::resolve(&format!("{}/gone", server.uri()), None)
            .await
            .unwrap();
        assert_eq!(page.title(), None);
        assert_eq!(page.to_page().display_title(), "Document");
    }
}
