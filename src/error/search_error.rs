//! Error types for running a search.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Rejected input, caught before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Free text must not be empty")]
    EmptyFreeText,

    #[error("At least one source must be selected")]
    NoSources,

    #[error("Unknown source: {0} (expected gov, tokyo or kanagawa)")]
    UnknownSource(String),
}

/// Failure of a whole search.
///
/// Malformed stream lines are not errors at this level; the parser drops
/// them and the search continues.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("Invalid search request: {0}")]
    Validation(#[from] ValidationError),

    #[error("Search request failed: {0}")]
    Transport(#[from] HttpError),

    #[error("Invalid service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },
}

impl SearchError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SearchError::Validation(_) => ErrorCategory::User,
            SearchError::Transport(HttpError::ServerError { .. }) => ErrorCategory::Server,
            SearchError::Transport(HttpError::InvalidUrl(_)) | SearchError::InvalidUrl { .. } => {
                ErrorCategory::Configuration
            }
            SearchError::Transport(_) => ErrorCategory::Network,
        }
    }

    /// Whether running the same search again could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SearchError::Transport(HttpError::ServerError { status, .. }) => {
                *status >= 500 || *status == 429 || *status == 408
            }
            other => other.category().is_retryable(),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::Validation(ValidationError::EmptyFreeText) => "E_INPUT_TEXT",
            SearchError::Validation(ValidationError::NoSources) => "E_INPUT_SOURCES",
            SearchError::Validation(ValidationError::UnknownSource(_)) => "E_INPUT_SOURCE",
            SearchError::Transport(HttpError::ConnectionFailed(_)) => "E_NET_CONN",
            SearchError::Transport(HttpError::Timeout(_)) => "E_NET_TIMEOUT",
            SearchError::Transport(HttpError::ServerError { .. }) => "E_NET_HTTP",
            SearchError::Transport(HttpError::Io(_)) => "E_NET_STREAM",
            SearchError::Transport(HttpError::InvalidUrl(_)) => "E_CFG_URL",
            SearchError::Transport(HttpError::Other(_)) => "E_NET_OTHER",
            SearchError::InvalidUrl { .. } => "E_CFG_URL",
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Validation(err) => err.to_string(),
            SearchError::Transport(HttpError::ServerError { status, .. }) => match *status {
                404 => "The search endpoint was not found. Check the service URL.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => "The search service failed. Please try again later.".to_string(),
                _ => format!("The search service returned an error (HTTP {}).", status),
            },
            SearchError::Transport(HttpError::Timeout(_)) => {
                "The search service did not respond in time.".to_string()
            }
            SearchError::Transport(HttpError::Io(_)) => {
                "The connection dropped while results were streaming.".to_string()
            }
            SearchError::Transport(_) => {
                "An error occurred while searching. Is the search service running?".to_string()
            }
            SearchError::InvalidUrl { url, .. } => {
                format!("The service URL '{}' is not usable.", url)
            }
        }
    }
}
