//! Client error model.

use thiserror::Error;

/// Errors surfaced by [`ApiClient`](crate::ApiClient) operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered outside 200-299. `body` is the raw response text.
    #[error("API call failed ({status}): {body}")]
    RequestFailed { status: u16, body: String },

    /// A 2xx body that is not the expected JSON shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(#[source] serde_json::Error),

    /// No response was received (connection refused, DNS, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("This username is already taken, please choose a different one")]
    UsernameTaken,

    #[error("This is already your current username")]
    UsernameUnchanged,

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The stored session token cannot be sent as a header value. Raised
    /// locally before anything goes out, so the request was never sent and
    /// the backend has not rejected it.
    #[error("Session token contains characters not allowed in a header")]
    InvalidCredential,

    #[error("Cannot read upload: {0}")]
    Upload(#[from] std::io::Error),

    #[error("Session store error: {0}")]
    Store(#[source] anyhow::Error),
}

impl ApiError {
    /// HTTP status of a failed request, if the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for 401/403: the session credential is no longer accepted.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
