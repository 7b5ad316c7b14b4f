//! Single request commands for scripting.
//!
//! Each invocation is its own process, so `ask` scrapes first to obtain a
//! session.

use console::style;
use pagechat_core::{Extension, PageContext, RelayPayload, RelayRequest, RelayResponse};
use serde_json::json;

pub async fn scrape(extension: &Extension, url: &str, json: bool) -> anyhow::Result<()> {
    let page = PageContext::new(url)?;
    let reply = extension.relay().request(RelayRequest::scrape(page.url())).await;
    report(&reply, json)
}

pub async fn ask(extension: &Extension, url: &str, question: &str, json: bool) -> anyhow::Result<()> {
    let page = PageContext::new(url)?;
    let relay = extension.relay();

    let scraped = relay.request(RelayRequest::scrape(page.url())).await;
    if !scraped.is_ok() {
        return report(&scraped, json);
    }

    let reply = relay.request(RelayRequest::ask(question, page.url())).await;
    report(&reply, json)
}

fn report(reply: &RelayResponse, json: bool) -> anyhow::Result<()> {
    if json {
        let value = match reply {
            RelayResponse::Ok {
                payload: RelayPayload::Answer(answer),
            } => json!({"success": true, "answer": answer}),
            RelayResponse::Ok { .. } => json!({"success": true}),
            RelayResponse::Err { message } => json!({"success": false, "error": message}),
        };
        println!("{}", value);
    } else {
        match reply {
            RelayResponse::Ok {
                payload: RelayPayload::Answer(answer),
            } => println!("{}", answer),
            RelayResponse::Ok { .. } => {
                println!("  {} Website content loaded.", style("✓").green().bold())
            }
            // Reported by the caller through the returned error
            RelayResponse::Err { .. } => {}
        }
    }

    match reply.error() {
        Some(message) => Err(anyhow::anyhow!(message.to_string())),
        None => Ok(()),
    }
}
