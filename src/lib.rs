//! roborev-tui - terminal dashboard for the roborev review queue

pub mod config;
pub mod error;
pub mod tui;
pub mod types;

pub use config::Config;
pub use error::{FetchError, FixSuggestion, TuiError};
pub use types::{DaemonStatus, Job, JobStatus, Review};
