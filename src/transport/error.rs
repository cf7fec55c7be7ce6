// src/transport/error.rs

/// Failure surfaced by a message transport.
///
/// This is the only error category RPC clients produce: every variant is
/// returned to the caller as-is, without retries or fallbacks.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Timed out waiting for a reply")]
    Timeout,

    #[error("Connection lost: {0}")]
    Disconnected(String),

    #[error("No consumer for topic {0}")]
    Unroutable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Remote error {exc_type}: {message}")]
    Remote { exc_type: String, message: String },

    #[error("Bus rejected message with status {status}")]
    Rejected { status: u16 },

    #[error("Invalid topic address: {0}")]
    InvalidAddress(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl TransportError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Timeout => "timeout",
            TransportError::Disconnected(_) => "disconnected",
            TransportError::Unroutable(_) => "unroutable",
            TransportError::Serialization(_) => "serialization",
            TransportError::Remote { .. } => "remote",
            TransportError::Rejected { .. } => "rejected",
            TransportError::InvalidAddress(_) => "invalid_address",
            TransportError::Http(_) => "http",
        }
    }
}
