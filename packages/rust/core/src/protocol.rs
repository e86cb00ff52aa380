//! Task envelope: JSON request in, `{success, data | error}` out.
//!
//! Every failure, including a malformed request, becomes a failure response
//! here; nothing past this boundary sees a `LayoutMapError`.

use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use layoutmap_shared::{ExtractionConfig, ExtractionResult, LayoutMapError, Result};

use crate::pipeline::parse_combined;

/// A task request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "task")]
pub enum Request {
    /// Extract all registries from one combined export.
    #[serde(rename = "parseCombined")]
    ParseCombined { xml: String },
}

/// Failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
    pub stack: String,
}

/// A task response; exactly one of `data` and `error` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ExtractionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

impl Response {
    pub fn ok(data: ExtractionResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(err: &LayoutMapError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorPayload {
                message: err.to_string(),
                stack: err.stack(),
            }),
        }
    }

    /// Render the response as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let rendered = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        rendered.map_err(|e| LayoutMapError::protocol(format!("failed to encode response: {e}")))
    }
}

/// Run one task.
#[instrument(skip_all)]
pub fn handle_request(request: Request, config: &ExtractionConfig) -> Response {
    let outcome = match request {
        Request::ParseCombined { xml } => parse_combined(&xml, config),
    };

    match outcome {
        Ok(data) => Response::ok(data),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "task failed");
            Response::failure(&err)
        }
    }
}

/// Decode a JSON request and run it.
pub fn handle_request_json(raw: &str, config: &ExtractionConfig) -> Response {
    match serde_json::from_str::<Request>(raw) {
        Ok(request) => handle_request(request, config),
        Err(e) => {
            let err = LayoutMapError::protocol(format!("invalid request: {e}"));
            warn!(error = %err, "rejecting request");
            Response::failure(&err)
        }
    }
}
