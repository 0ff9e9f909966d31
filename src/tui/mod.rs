//! TUI Module - Review Queue Dashboard
//!
//! Terminal view of the roborev daemon: job queue, worker counts and the
//! text of finished reviews.
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 UI LAYER (render.rs, widgets/)                      │
//! │  Pure rendering. (AppState, now) -> Text. No business logic.        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ &AppState
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │               DOMAIN LAYER (state.rs, events.rs)                    │
//! │  step(AppState, Event) -> (AppState, Vec<Command>). No IO.          │
//! └─────────────────────────────────────────────────────────────────────┘
//!                               ▲
//!                               │ Event (one per completed Fetch / Tick)
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │              CONNECTOR LAYER (runtime/, ticker.rs)                  │
//! │  DaemonClient trait. Async IO. HttpDaemon + MockDaemon.             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod state;
mod theme;
mod ticker;

pub mod events;
pub mod render;
pub mod runtime;
pub mod widgets;

use std::sync::Arc;

pub use app::TuiApp;
pub use events::{map_key, startup_commands, step, Action, Command, Event, Fetch};
pub use runtime::{DaemonClient, Dispatcher, HttpDaemon, MockDaemon};
pub use state::{AppState, ViewState};
pub use theme::QueueTheme;
pub use ticker::Ticker;

use crate::config::Config;
use crate::error::Result;

/// Run the dashboard against the configured daemon
pub async fn run(config: &Config) -> Result<()> {
    let client: Arc<dyn DaemonClient> = if config.demo {
        tracing::info!("running against the built-in demo queue");
        Arc::new(MockDaemon::demo())
    } else {
        tracing::info!(server = %config.server, "connecting to daemon");
        Arc::new(HttpDaemon::new(
            config.server.clone(),
            config.request_timeout,
        )?)
    };

    TuiApp::new(client, config).run().await
}
