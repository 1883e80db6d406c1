//! Transport message envelope.
//!
//! The panel and background coordinator talk to the page with small JSON
//! messages keyed by `action`. This module decodes them, runs the
//! extraction and encodes the reply. Delivery itself belongs to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extract::extract;
use crate::options::ExtractionOptions;
use crate::page::Page;
use crate::result::ExtractionResult;

/// A request from the panel or background coordinator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action")]
pub enum Request {
    #[serde(rename = "EXTRACT_CONTENT")]
    ExtractContent {
        #[serde(default)]
        options: Option<ExtractionOptions>,
    },
    /// Liveness probe from a caller deciding whether to inject the fallback.
    #[serde(rename = "ping")]
    Ping,
}

/// Reply sent back over the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Extraction(Box<ExtractionResult>),
    Status { status: &'static str },
    Failure { success: bool, error: String },
}

impl Response {
    fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }
}

/// Answer one decoded request.
pub fn handle_request(page: &dyn Page, request: Request) -> Response {
    match request {
        Request::ExtractContent { options } => {
            let options = options.unwrap_or_default();
            Response::Extraction(Box::new(extract(page, &options)))
        }
        Request::Ping => Response::Status { status: "ready" },
    }
}

/// Actions this envelope understands, as spelled on the wire.
const ACTIONS: &[&str] = &["EXTRACT_CONTENT", "ping"];

/// Decode and answer a raw JSON message.
///
/// Messages that are not JSON or name no known action get
/// `{"success": false, "error": "Unknown action"}`. A known action with a
/// payload that does not decode gets `"Invalid <action> request: ..."`.
pub fn handle_message(page: &dyn Page, raw: &str) -> Response {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(error = %err, "message is not json");
            return Response::failure("Unknown action");
        }
    };
    let action = value
        .get("action")
        .and_then(Value::as_str)
        .filter(|action| ACTIONS.contains(action))
        .map(str::to_string);

    match (serde_json::from_value::<Request>(value), action) {
        (Ok(request), _) => {
            tracing::debug!(?request, "message received");
            handle_request(page, request)
        }
        (Err(err), Some(action)) => {
            tracing::warn!(%action, error = %err, "malformed request payload");
            Response::failure(format!("Invalid {action} request: {err}"))
        }
        (Err(err), None) => {
            tracing::warn!(error = %err, "unrecognized message");
            Response::failure("Unknown action")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HtmlPage;

    fn page() -> HtmlPage {
        HtmlPage::new(
            "<title>Doc</title><main>Some main content for the reader.</main>",
            "https://example.com/x",
        )
        .expect("valid page")
    }

    #[test]
    fn ping_reports_ready() {
        let response = handle_message(&page(), r#"{"action":"ping"}"#);
        assert_eq!(response, Response::Status { status: "ready" });
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json, serde_json::json!({"status": "ready"}));
    }

    #[test]
    fn extract_without_options_uses_defaults() {
        let response = handle_message(&page(), r#"{"action":"EXTRACT_CONTENT"}"#);
        let Response::Extraction(result) = response else {
            panic!("expected extraction, got {response:?}");
        };
        assert!(result.success);
        assert!(result.selected_text.is_none());
    }

    #[test]
    fn extract_with_null_options_is_accepted() {
        let response = handle_message(&page(), r#"{"action":"EXTRACT_CONTENT","options":null}"#);
        assert!(matches!(response, Response::Extraction(_)));
    }

    #[test]
    fn extraction_reply_is_the_bare_result() {
        let response = handle_message(
            &page(),
            r#"{"action":"EXTRACT_CONTENT","options":{"maxLength":4}}"#,
        );
        let json = serde_json::to_value(&response).expect("serializable");
        assert_eq!(json["success"], true);
        assert_eq!(json["content"], "Some");
        assert_eq!(json["metadata"]["truncated"], true);
    }

    #[test]
    fn unknown_action_is_a_failure_reply() {
        for raw in [r#"{"action":"reload"}"#, "not json", "{}"] {
            let json = serde_json::to_value(handle_message(&page(), raw)).expect("serializable");
            assert_eq!(json, serde_json::json!({"success": false, "error": "Unknown action"}));
        }
    }

    #[test]
    fn float_length_still_extracts() {
        let response = handle_message(
            &page(),
            r#"{"action":"EXTRACT_CONTENT","options":{"maxLength":4.0}}"#,
        );
        let Response::Extraction(result) = response else {
            panic!("expected extraction, got {response:?}");
        };
        assert_eq!(result.content, "Some");
    }

    #[test]
    fn bad_payload_for_known_action_is_not_unknown() {
        let response = handle_message(
            &page(),
            r#"{"action":"EXTRACT_CONTENT","options":{"maxLength":"lots"}}"#,
        );
        let Response::Failure { success, error } = response else {
            panic!("expected failure, got {response:?}");
        };
        assert!(!success);
        assert!(error.starts_with("Invalid EXTRACT_CONTENT request"), "{error}");
    }
}
