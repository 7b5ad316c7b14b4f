//! JSON message contract between UI contexts and the relay
//!
//! Requests look like `{"action": "scrapeWebsite", "currentUrl": "..."}` or
//! `{"action": "askQuestion", "question": "...", "currentUrl": "..."}`.
//! Responses look like `{"success": true, "answer": "..."}` or
//! `{"success": false, "error": "..."}`.

use serde::{Deserialize, Serialize};

use crate::message::{RelayPayload, RelayRequest, RelayResponse};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum WireRequest {
    #[serde(rename = "scrapeWebsite")]
    ScrapeWebsite {
        #[serde(rename = "currentUrl", default)]
        current_url: String,
    },
    #[serde(rename = "askQuestion")]
    AskQuestion {
        #[serde(default)]
        question: String,
        #[serde(rename = "currentUrl", default)]
        current_url: String,
    },
}

impl From<WireRequest> for RelayRequest {
    fn from(wire: WireRequest) -> Self {
        match wire {
            WireRequest::ScrapeWebsite { current_url } => RelayRequest::Scrape { url: current_url },
            WireRequest::AskQuestion {
                question,
                current_url,
            } => RelayRequest::AskQuestion {
                question,
                url: current_url,
            },
        }
    }
}

impl From<RelayRequest> for WireRequest {
    fn from(request: RelayRequest) -> Self {
        match request {
            RelayRequest::Scrape { url } => WireRequest::ScrapeWebsite { current_url: url },
            RelayRequest::AskQuestion { question, url } => WireRequest::AskQuestion {
                question,
                current_url: url,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl From<RelayResponse> for WireResponse {
    fn from(response: RelayResponse) -> Self {
        match response {
            RelayResponse::Ok {
                payload: RelayPayload::Scraped,
            } => Self {
                success: true,
                answer: None,
                error: None,
            },
            RelayResponse::Ok {
                payload: RelayPayload::Answer(answer),
            } => Self {
                success: true,
                answer: Some(answer),
                error: None,
            },
            RelayResponse::Err { message } => Self {
                success: false,
                answer: None,
                error: Some(message),
            },
        }
    }
}

/// A request line on the JSON-lines host, optionally tagged for pairing.
#[derive(Debug, Clone, Deserialize)]
pub struct WireEnvelope {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub request: WireRequest,
}

/// A response line, echoing the request's `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireReply {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub id: Option<u64>,
    #[serde(flatten)]
    pub response: WireResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_scrape_action() {
        let wire: WireRequest = serde_json::from_value(json!({
            "action": "scrapeWebsite",
            "currentUrl": "https://example.com"
        }))
        .unwrap();
        assert_eq!(
            RelayRequest::from(wire),
            RelayRequest::scrape("https://example.com")
        );
    }

    #[test]
    fn test_parse_ask_without_question() {
        let wire: WireRequest = serde_json::from_value(json!({
            "action": "askQuestion",
            "currentUrl": "https://example.com"
        }))
        .unwrap();
        assert_eq!(
            RelayRequest::from(wire),
            RelayRequest::ask("", "https://example.com")
        );
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let result: Result<WireRequest, _> =
            serde_json::from_value(json!({"action": "deleteEverything"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_response_shapes() {
        let ok = serde_json::to_value(WireResponse::from(RelayResponse::scraped())).unwrap();
        assert_eq!(ok, json!({"success": true}));

        let answer =
            serde_json::to_value(WireResponse::from(RelayResponse::answer("42"))).unwrap();
        assert_eq!(answer, json!({"success": true, "answer": "42"}));

        let err = serde_json::to_value(WireResponse::from(RelayResponse::err("Missing question")))
            .unwrap();
        assert_eq!(err, json!({"success": false, "error": "Missing question"}));
    }

    #[test]
    fn test_envelope_id() {
        let envelope: WireEnvelope = serde_json::from_str(
            r#"{"id": 9, "action": "askQuestion", "question": "Why?", "currentUrl": "https://a.b"}"#,
        )
        .unwrap();
        assert_eq!(envelope.id, Some(9));
        assert!(matches!(envelope.request, WireRequest::AskQuestion { .. }));

        let reply = WireReply {
            id: Some(9),
            response: WireResponse::from(RelayResponse::answer("Because.")),
        };
        assert_eq!(
            serde_json::to_value(reply).unwrap(),
            json!({"id": 9, "success": true, "answer": "Because."})
        );
    }
}
