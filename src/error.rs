use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single remote call to either platform.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Statuses worth retrying: rate limit, conflict, server error,
    /// service unavailable, and quota-exceeded (reported as 403).
    pub fn is_transient(&self) -> bool {
        match self {
            ApiError::Status { status, .. } => matches!(
                status.as_u16(),
                403 | 409 | 429 | 500 | 503
            ),
            ApiError::Transport(_) => false,
        }
    }
}
