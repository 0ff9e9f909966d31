//! Dashboard configuration
//!
//! ## Server address priority (highest to lowest)
//!
//! 1. `--server` flag or `ROBOREV_SERVER` environment variable
//! 2. Daemon runtime file (`$ROBOREV_DATA_DIR/daemon.json`, else `~/.roborev/daemon.json`)
//! 3. `http://127.0.0.1:7373`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{Result, TuiError};

/// Address used when nothing else is configured
pub const DEFAULT_SERVER: &str = "http://127.0.0.1:7373";

/// Runtime file written by a running daemon
pub const RUNTIME_FILE: &str = "daemon.json";

/// Number of jobs requested per poll
pub const DEFAULT_JOB_LIMIT: usize = 50;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolved dashboard configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base address of the daemon API
    pub server: Url,
    /// Delay between job/status polls
    pub poll_interval: Duration,
    /// Per-request transport timeout
    pub request_timeout: Duration,
    /// `limit` query parameter for the jobs endpoint
    pub job_limit: usize,
    /// Where tracing output goes (none: logging disabled)
    pub log_file: Option<PathBuf>,
    /// Serve a built-in sample queue instead of talking to a daemon
    pub demo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            job_limit: DEFAULT_JOB_LIMIT,
            log_file: None,
            demo: false,
        }
    }
}

/// Contents of the daemon runtime file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeInfo {
    /// `host:port` the daemon listens on
    pub addr: String,
    #[serde(default)]
    pub pid: Option<u32>,
}

impl Config {
    /// Resolve the server address from an explicit value, then the runtime
    /// file in `data_dir`, then the default.
    pub fn discover_server(explicit: Option<&str>, data_dir: Option<&Path>) -> Result<Url> {
        if let Some(raw) = explicit {
            return parse_server(raw);
        }

        if let Some(dir) = data_dir {
            match read_runtime(dir) {
                Ok(Some(info)) => {
                    tracing::debug!(addr = %info.addr, pid = ?info.pid, "using daemon runtime file");
                    return parse_server(&info.addr);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring unreadable daemon runtime file");
                }
            }
        }

        Ok(default_server())
    }

    /// Validate poll and timeout settings given in whole seconds
    pub fn with_timing(mut self, poll_secs: u64, timeout_secs: u64) -> Result<Self> {
        if poll_secs == 0 {
            return Err(TuiError::Config {
                reason: "poll interval must be at least 1 second".to_string(),
            });
        }
        if timeout_secs == 0 {
            return Err(TuiError::Config {
                reason: "request timeout must be at least 1 second".to_string(),
            });
        }
        self.poll_interval = Duration::from_secs(poll_secs);
        self.request_timeout = Duration::from_secs(timeout_secs);
        Ok(self)
    }
}

/// Directory holding the daemon runtime file
///
/// `ROBOREV_DATA_DIR` wins over `~/.roborev`.
pub fn data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("ROBOREV_DATA_DIR") {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir));
        }
    }
    dirs::home_dir().map(|home| home.join(".roborev"))
}

/// Read `daemon.json` from `dir`
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_runtime(dir: &Path) -> Result<Option<RuntimeInfo>> {
    let path = dir.join(RUNTIME_FILE);
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| TuiError::Config {
        reason: format!("Failed to read {}: {}", path.display(), e),
    })?;

    let info: RuntimeInfo = serde_json::from_str(&content).map_err(|e| TuiError::Config {
        reason: format!("Failed to parse {}: {}", path.display(), e),
    })?;

    if info.addr.trim().is_empty() {
        return Err(TuiError::Config {
            reason: format!("{} has an empty addr", path.display()),
        });
    }

    Ok(Some(info))
}

/// Parse a server address, accepting bare `host:port`
pub fn parse_server(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let candidate = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{}", raw)
    };

    let url = Url::parse(&candidate).map_err(|e| TuiError::Config {
        reason: format!("invalid server address '{}': {}", raw, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(TuiError::Config {
            reason: format!("unsupported scheme '{}' in server address '{}'", other, raw),
        }),
    }
}

fn default_server() -> Url {
    Url::parse(DEFAULT_SERVER).expect("DEFAULT_SERVER is a valid URL")
}
