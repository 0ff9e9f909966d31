//! roborev-tui CLI - live dashboard for the roborev review daemon

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use roborev_tui::config::{self, Config, DEFAULT_JOB_LIMIT};
use roborev_tui::error::{FixSuggestion, TuiError};

#[derive(Parser)]
#[command(name = "roborev-tui")]
#[command(about = "Terminal dashboard for the roborev review queue")]
#[command(version)]
struct Cli {
    /// Daemon address (host:port or URL). Defaults to the address in
    /// ~/.roborev/daemon.json, then http://127.0.0.1:7373
    #[arg(short, long, env = "ROBOREV_SERVER")]
    server: Option<String>,

    /// Seconds between refreshes
    #[arg(short, long, default_value_t = 2)]
    interval: u64,

    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 10)]
    timeout: u64,

    /// Most recent jobs to fetch
    #[arg(short, long, default_value_t = DEFAULT_JOB_LIMIT)]
    limit: usize,

    /// Write logs to this file (the terminal is owned by the dashboard)
    #[arg(long, env = "ROBOREV_TUI_LOG")]
    log_file: Option<PathBuf>,

    /// Show a built-in sample queue instead of contacting a daemon
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.downcast_ref::<TuiError>().and_then(|e| e.fix_suggestion()) {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = resolve_config(&cli)?;
    tracing::info!(
        server = %config.server,
        interval = ?config.poll_interval,
        limit = config.job_limit,
        demo = config.demo,
        "starting dashboard"
    );

    roborev_tui::tui::run(&config)
        .await
        .with_context(|| format!("dashboard for {} stopped", config.server))?;
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<Config, TuiError> {
    if cli.limit == 0 {
        return Err(TuiError::Config {
            reason: "job limit must be at least 1".to_string(),
        });
    }

    let data_dir = config::data_dir();
    let server = Config::discover_server(cli.server.as_deref(), data_dir.as_deref())?;

    Config {
        server,
        job_limit: cli.limit,
        log_file: cli.log_file.clone(),
        demo: cli.demo,
        ..Config::default()
    }
    .with_timing(cli.interval, cli.timeout)
}

/// Plain-text logs to `path`; nothing is written to the terminal
fn init_logging(path: &Path) -> Result<(), TuiError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
