use thiserror::Error;

/// Failures of a single request to the assistant backend.
///
/// `Display` is the message shown to the user in the error alert.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or transport failure, surfaced verbatim.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response. `message` is the server's `detail` or a generated fallback.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The body decoded but a value is out of range.
    #[error("Invalid response from {path}: {reason}")]
    Invalid { path: String, reason: String },

    #[error("Invalid API URL '{url}': {reason}")]
    Url { url: String, reason: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
