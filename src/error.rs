//! Error type for a single fetch attempt
//!
//! Every failure the fetch operation can hit collapses into `FetchError`.
//! The variants only exist so each failure produces the right text; the UI
//! never branches on them, it just shows `to_string()` after "Error:".

use thiserror::Error;

/// Why a fetch attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status code
    #[error("Failed to fetch dog image")]
    Status(u16),

    /// Connection, TLS or body transfer failure
    #[error("{0}")]
    Transport(String),

    /// Body was not the JSON we expected (or not an image, for downloads)
    #[error("{0}")]
    Decode(String),

    /// The fetch task panicked with a readable message
    #[error("{0}")]
    Aborted(String),

    /// The fetch task died without anything we can show
    #[error("Unknown error occurred")]
    Unknown,
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
