use reqwest::StatusCode;
use thiserror::Error;

/// Message shown to the user for every fetch failure.
pub const GENERIC_FETCH_ERROR: &str = "City not found or API error.";

/// Why a weather lookup failed.
///
/// Every variant displays the same user-facing text; the cause is only
/// reachable through [`std::error::Error::source`] and the logs.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No response was obtained, or its body could not be read.
    #[error("City not found or API error.")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("City not found or API error.")]
    Provider { status: StatusCode },

    /// The body was not the expected JSON shape.
    #[error("City not found or API error.")]
    MalformedResponse(#[source] MalformedResponse),
}

#[derive(Debug, Error)]
pub enum MalformedResponse {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response contained no weather conditions")]
    NoConditions,
}

impl FetchError {
    /// Diagnostic text including the underlying cause, for logging.
    pub fn detail(&self) -> String {
        match self {
            FetchError::Transport(err) => format!("transport failure: {err}"),
            FetchError::Provider { status } => format!("provider returned status {status}"),
            FetchError::MalformedResponse(err) => format!("malformed response: {err}"),
        }
    }
}
