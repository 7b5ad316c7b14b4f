//! Popup panel front end.

use anyhow::Context;
use console::style;
use pagechat_core::{Extension, PageContext};
use serde_json::json;

use super::chat::run_loop;
use super::surface::TerminalSurface;

pub async fn run(extension: &Extension, url: Option<&str>, json: bool) -> anyhow::Result<()> {
    let remembered = extension.document_store().load()?;

    let page = match (remembered, url) {
        (Some(document), _) => PageContext::new(&document.url)?.with_title(document.title),
        (None, Some(url)) => {
            PageContext::resolve(url, extension.config().request_timeout()).await?
        }
        (None, None) => {
            anyhow::bail!("No document is remembered. Pass a page URL to process one.")
        }
    };

    let mut popup = extension.popup(TerminalSurface::new(json), &page);
    let first = popup.open();
    run_loop(popup, first)
        .await
        .context("Popup session failed")
}

pub fn forget(extension: &Extension, json: bool) -> anyhow::Result<()> {
    extension.document_store().clear()?;

    if json {
        println!("{}", json!({"forgotten": true}));
    } else {
        println!("  {} Forgot the remembered document.", style("✓").green().bold());
    }
    Ok(())
}
