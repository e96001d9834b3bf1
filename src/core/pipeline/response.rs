use serde::Serialize;

use crate::core::error::MetaError;
use crate::core::publish::JSON_CONTENT_TYPE;

/// Failure body: `{"message": "<detail>"}`.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope<'a> {
    pub message: &'a MetaError,
}

/// Result of one invocation, shaped like an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl InvocationResponse {
    pub fn ok(body: String) -> Self {
        Self {
            status: 200,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    pub fn failure(error: &MetaError) -> Self {
        let envelope = ErrorEnvelope { message: error };
        let body = serde_json::to_string(&envelope)
            .unwrap_or_else(|_| r#"{"message": "unknown error"}"#.to_string());

        Self {
            status: 500,
            content_type: JSON_CONTENT_TYPE,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}
