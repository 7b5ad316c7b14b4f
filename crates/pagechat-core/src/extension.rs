//! Main extension state container
//!
//! Owns the database, the session registry and the running relay. Every UI
//! context is created from here and talks to the backend only through the
//! relay handle.

use pagechat_backend::{Backend, BackendClient};
use pagechat_relay::{Relay, RelayHandle};
use pagechat_session::SessionRegistry;
use pagechat_storage::Database;
use pagechat_widget::{DocumentStore, Surface, Variant, WidgetController};
use std::sync::Arc;

use crate::config::Config;
use crate::page::PageContext;
use crate::Result;

pub struct Extension {
    config: Config,
    registry: SessionRegistry,
    relay: RelayHandle,
    documents: DocumentStore,
}

impl Extension {
    /// Open the database, build the HTTP backend and start the relay.
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let db = Database::open(&config.database_path)?;
        let backend = BackendClient::new(&config.backend_url, config.request_timeout())?;

        Ok(Self::with_backend(config, db, Arc::new(backend)))
    }

    /// Same wiring with a caller-supplied backend and database.
    pub fn with_backend(config: Config, db: Database, backend: Arc<dyn Backend>) -> Self {
        let registry = SessionRegistry::new();
        let relay = Relay::new(backend, registry.clone())
            .with_scrape_failure_policy(config.scrape_failure)
            .spawn();

        tracing::info!(
            backend_url = %config.backend_url,
            scrape_failure = ?config.scrape_failure,
            reopen = ?config.reopen,
            "Extension initialized"
        );

        Self {
            config,
            registry,
            relay,
            documents: DocumentStore::new(db),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn relay(&self) -> RelayHandle {
        self.relay.clone()
    }

    pub fn document_store(&self) -> &DocumentStore {
        &self.documents
    }

    /// In-page overlay for `page`.
    pub fn overlay<S: Surface>(&self, surface: S, page: &PageContext) -> WidgetController<S> {
        WidgetController::new(
            self.relay(),
            surface,
            page.to_page(),
            Variant::Overlay {
                reopen: self.config.reopen,
            },
        )
    }

    /// Popup panel for `page`. Restores the remembered document if any.
    pub fn popup<S: Surface>(&self, surface: S, page: &PageContext) -> WidgetController<S> {
        WidgetController::new(
            self.relay(),
            surface,
            page.to_page(),
            Variant::Popup {
                store: self.documents.clone(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagechat_relay::{RelayRequest, RelayResponse, ScrapeFailurePolicy};
    use pagechat_widget::{ChatMessage, Notice, Page, WidgetState};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Silent;

    impl Surface for Silent {
        fn show_trigger(&mut self) {}
        fn show_shell(&mut self, _page: &Page) {}
        fn show_notice(&mut self, _notice: &Notice) {}
        fn append_message(&mut self, _message: &ChatMessage) {}
        fn show_typing(&mut self) {}
        fn hide_typing(&mut self) {}
        fn teardown(&mut self) {}
    }

    fn config_for(server: &MockServer, dir: &tempfile::TempDir) -> Config {
        Config {
            backend_url: server.uri(),
            database_path: dir.path().join("pagechat.db"),
            ..Config::new(dir.path().to_path_buf())
        }
    }

    async fn mount_backend(server: &MockServer, scrapes: u64) {
        Mock::given(method("POST"))
            .and(path("/scrape"))
            .and(body_json(json!({
                "website_url": "https://example.com/post",
                "tenant_id": "session_1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
            .expect(scrapes)
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({
                "message": "Who wrote it?",
                "tenant_id": "session_1"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Someone."})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_overlay_against_http_backend() {
        let server = MockServer::start().await;
        mount_backend(&server, 1).await;
        let dir = tempfile::tempdir().unwrap();

        let extension = Extension::new(config_for(&server, &dir)).unwrap();
        let page = PageContext::new("https://example.com/post").unwrap();
        let mut widget = extension.overlay(Silent, &page);

        let (ticket, reply) = widget.open().unwrap().settle().await;
        widget.on_reply(ticket, reply);
        assert_eq!(widget.notice(), Some(&Notice::loaded()));

        let (ticket, reply) = widget.submit("Who wrote it?").unwrap().settle().await;
        widget.on_reply(ticket, reply);

        assert_eq!(widget.state(), WidgetState::Ready);
        assert_eq!(widget.log().last().map(|m| m.content.as_str()), Some("Someone."));
        assert_eq!(
            extension.registry().current_session().map(|id| id.to_string()),
            Some("session_1".to_string())
        );
    }

    #[tokio::test]
    async fn test_popup_remembers_across_instances() {
        let server = MockServer::start().await;
        // The second process has no session and ingests the document again
        mount_backend(&server, 2).await;
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&server, &dir);

        {
            let extension = Extension::new(config.clone()).unwrap();
            let page = PageContext::new("https://example.com/post")
                .unwrap()
                .with_title("A Post");
            let mut popup = extension.popup(Silent, &page);
            let (ticket, reply) = popup.open().unwrap().settle().await;
            popup.on_reply(ticket, reply);
        }

        // A fresh process sees the same database file
        let extension = Extension::new(config).unwrap();
        let stored = extension.document_store().load().unwrap().unwrap();
        assert_eq!(stored.url, "https://example.com/post");
        assert_eq!(stored.title, "A Post");

        let mut popup = extension.popup(Silent, &PageContext::new("https://other.example").unwrap());
        let (ticket, reply) = popup.open().unwrap().settle().await;
        popup.on_reply(ticket, reply);
        assert_eq!(popup.page().url, "https://example.com/post");
        assert_eq!(popup.notice(), Some(&Notice::restored()));

        let (ticket, reply) = popup.submit("Who wrote it?").unwrap().settle().await;
        popup.on_reply(ticket, reply);
        let last = popup.log().last().unwrap();
        assert!(!last.is_error);
        assert_eq!(last.content, "Someone.");
    }

    #[tokio::test]
    async fn test_rollback_policy_is_wired() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/scrape"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();

        let config = Config {
            scrape_failure: ScrapeFailurePolicy::Rollback,
            ..config_for(&server, &dir)
        };
        let extension = Extension::new(config).unwrap();

        let reply = extension
            .relay()
            .request(RelayRequest::scrape("https://example.com"))
            .await;
        assert_eq!(reply, RelayResponse::err("Server responded with status: 503"));
        assert_eq!(extension.registry().current_session(), None);
        assert_eq!(extension.registry().issued(), 1);
    }
}
