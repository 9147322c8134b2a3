use serde_json::Value;
use thiserror::Error;

use crate::transport::TransportError;

/// Keys scanned for the most specific application error message, in order.
const MESSAGE_KEYS: &[&str] = &["message", "title", "detail"];

const FALLBACK_MESSAGE: &str = "the request could not be processed";

/// Errors surfaced by the API client.
///
/// Local validation failures never appear here: callers run the admission
/// rules before anything is submitted.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never reached the store; the fixed message is what users
    /// see, the source keeps the transport detail for logs.
    #[error("could not reach the expense API")]
    Unreachable(#[source] TransportError),
    /// The store answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Builds the application error for a rejected response, surfacing the
    /// most specific message the body carries.
    pub(crate) fn from_rejection(status: u16, body: &Value) -> Self {
        let message = MESSAGE_KEYS
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .unwrap_or(FALLBACK_MESSAGE)
            .to_string();
        Self::Api { status, message }
    }
}
