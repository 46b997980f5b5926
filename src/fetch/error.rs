// src/fetch/error.rs
use thiserror::Error;

/// Classified failure of a single fetch task.
///
/// Never escapes the worker: every variant is folded into an [`Outcome`]
/// so one bad upstream cannot abort the rest of the batch.
///
/// [`Outcome`]: crate::fetch::types::Outcome
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Malformed URL or header setup failure.
    #[error("Error creating request: {0}")]
    RequestBuild(String),

    /// DNS, connect, timeout or body read failure.
    #[error("Error: {0}")]
    Transport(String),

    /// Non-2xx response; keeps the upstream body for diagnosis.
    #[error("Error HTTP ({status}): {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Error: empty response body")]
    EmptyBody,

    /// Adapter could not decode the JSON/XML payload.
    #[error("Error: {0}")]
    Parse(String),

    /// The spawned worker panicked or was aborted before reporting.
    #[error("Error: worker failed: {0}")]
    Worker(String),
}

impl FetchError {
    /// Stable machine-readable classification, used for metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::RequestBuild(_) => "request_build",
            FetchError::Transport(_) => "transport",
            FetchError::HttpStatus { .. } => "http_status",
            FetchError::EmptyBody => "empty_body",
            FetchError::Parse(_) => "parse",
            FetchError::Worker(_) => "worker",
        }
    }
}
