//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Failure of a single fetch against the daemon API.
///
/// Every fetch failure ends up as a message in the dashboard state, so the
/// variants only carry what is needed to describe the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("cannot reach daemon: {0}")]
    Transport(String),

    #[error("daemon returned HTTP {status} for {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("malformed response from {endpoint}: {details}")]
    Decode { endpoint: String, details: String },

    #[error("no review found for job {job_id}")]
    NotFound { job_id: i64 },
}

impl FetchError {
    /// True for the "review not found" condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Crate-level errors surfaced to the operator before or after the TUI runs
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    #[error("Terminal error: {reason}")]
    Terminal { reason: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TuiError>;

impl FixSuggestion for TuiError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            TuiError::Config { .. } => {
                Some("Pass --server http://host:port or set ROBOREV_SERVER")
            }
            TuiError::Terminal { .. } => Some("Run roborev-tui from an interactive terminal"),
            TuiError::Client(_) => Some("Check the --timeout value and TLS setup"),
            TuiError::Io(_) => Some("Check terminal and log file permissions"),
        }
    }
}
