//! JSON-lines relay host
//!
//! Lets an out-of-process UI context reach the relay: one request object per
//! input line, one reply object per output line. Requests are served
//! concurrently and replies are written as they complete, so callers pair
//! them by the `id` they supplied.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::broker::RelayHandle;
use crate::error::RelayError;
use crate::message::{RelayRequest, RelayResponse};
use crate::wire::{WireEnvelope, WireReply, WireResponse};

/// Serve until `reader` reaches EOF and every accepted request is answered.
pub async fn serve_lines<R, W>(handle: RelayHandle, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<WireReply>();

    let read = async move {
        let mut reader = reader;
        let mut buf = Vec::new();
        let mut accepted = 0u64;

        let reject = |id: Option<u64>, reason: String| {
            tracing::warn!(error = %reason, "Rejected malformed relay line");
            let response: RelayResponse = RelayError::InvalidRequest(reason).into();
            let _ = out_tx.send(WireReply {
                id,
                response: response.into(),
            });
        };

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            // A bad line is answered, never fatal
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line.trim(),
                Err(e) => {
                    reject(None, e.to_string());
                    continue;
                }
            };
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<WireEnvelope>(line) {
                Ok(WireEnvelope { id, request }) => {
                    accepted += 1;
                    let pending = handle.dispatch(RelayRequest::from(request));
                    let out_tx = out_tx.clone();
                    tokio::spawn(async move {
                        let response = WireResponse::from(pending.await);
                        let _ = out_tx.send(WireReply { id, response });
                    });
                }
                Err(e) => reject(recover_id(line), e.to_string()),
            }
        }

        tracing::debug!(accepted, "Relay input closed");
        Ok::<_, std::io::Error>(())
    };

    let write = async {
        while let Some(reply) = out_rx.recv().await {
            let mut line = serde_json::to_vec(&reply)?;
            line.push(b'\n');
            writer.write_all(&line).await?;
            writer.flush().await?;
        }
        Ok::<_, std::io::Error>(())
    };

    let (read_result, write_result) = tokio::join!(read, write);
    read_result?;
    write_result
}

/// Best effort: echo the id of a line whose action could not be parsed.
fn recover_id(line: &str) -> Option<u64> {
    serde_json::from_str::<serde_json::Value>(line)
        .ok()?
        .get("id")?
        .as_u64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::tests::FakeBackend;
    use crate::relay::Relay;
    use pagechat_session::SessionRegistry;
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn run(input: &str) -> Vec<Value> {
        run_bytes(input.as_bytes()).await
    }

    async fn run_bytes(input: &[u8]) -> Vec<Value> {
        let handle = Relay::new(Arc::new(FakeBackend::default()), SessionRegistry::new()).spawn();
        let mut output = Vec::new();
        serve_lines(handle, input, &mut output).await.unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    fn by_id(replies: &[Value], id: u64) -> &Value {
        replies
            .iter()
            .find(|r| r["id"] == json!(id))
            .unwrap_or_else(|| panic!("no reply for id {id}"))
    }

    #[tokio::test]
    async fn test_question_without_scrape() {
        let replies = run(
            r#"{"id":1,"action":"askQuestion","question":"What is this page about?","currentUrl":"https://example.com"}"#,
        )
        .await;

        assert_eq!(
            replies,
            vec![json!({
                "id": 1,
                "success": false,
                "error": "tenantId is not defined. Please scrape a website first."
            })]
        );
    }

    #[tokio::test]
    async fn test_every_line_gets_one_reply() {
        let input = [
            r#"{"id":1,"action":"scrapeWebsite","currentUrl":"https://example.com"}"#,
            "",
            r#"{"id":2,"action":"askQuestion","currentUrl":"https://example.com"}"#,
            r#"{"id":3,"action":"launchMissiles"}"#,
            "not json",
        ]
        .join("\n");

        let replies = run(&input).await;
        assert_eq!(replies.len(), 4);

        assert_eq!(by_id(&replies, 1), &json!({"id": 1, "success": true}));
        assert_eq!(
            by_id(&replies, 2),
            &json!({"id": 2, "success": false, "error": "Missing question"})
        );
        assert_eq!(by_id(&replies, 3)["success"], json!(false));

        let anonymous: Vec<_> = replies.iter().filter(|r| r.get("id").is_none()).collect();
        assert_eq!(anonymous.len(), 1);
        assert!(anonymous[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request:"));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_keeps_serving() {
        let mut input = b"\xff\xfe bad\n".to_vec();
        input.extend_from_slice(
            br#"{"id":2,"action":"scrapeWebsite","currentUrl":"https://example.com"}"#,
        );
        input.push(b'\n');

        let replies = run_bytes(&input).await;
        assert_eq!(replies.len(), 2);
        assert_eq!(by_id(&replies, 2), &json!({"id": 2, "success": true}));

        let rejected: Vec<_> = replies.iter().filter(|r| r.get("id").is_none()).collect();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0]["success"], json!(false));
        assert!(rejected[0]["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request:"));
    }

    #[tokio::test]
    async fn test_last_line_without_newline() {
        let replies = run(r#"{"id":7,"action":"scrapeWebsite","currentUrl":"https://example.com"}"#).await;
        assert_eq!(replies, vec![json!({"id": 7, "success": true})]);
    }
}
