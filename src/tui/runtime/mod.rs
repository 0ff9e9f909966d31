//! Daemon Bridge - Connector Layer
//!
//! Async IO against the review daemon. Fetches run on their own tasks and
//! report back with exactly one [`Event`] each; they never touch `AppState`.

mod http;
mod mock;

pub use http::HttpDaemon;
pub use mock::{CallCounts, MockDaemon};

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::events::{Event, Fetch};
use crate::error::FetchError;
use crate::types::{DaemonStatus, Job, Review};

// ─────────────────────────────────────────────────────────────────────────────
// Daemon Client Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The three read endpoints the dashboard consumes
#[async_trait]
pub trait DaemonClient: Send + Sync {
    /// `GET /api/jobs?limit=N`
    async fn fetch_jobs(&self, limit: usize) -> Result<Vec<Job>, FetchError>;

    /// `GET /api/status`
    async fn fetch_status(&self) -> Result<DaemonStatus, FetchError>;

    /// `GET /api/review?job_id=ID`
    async fn fetch_review(&self, job_id: i64) -> Result<Review, FetchError>;
}

impl Fetch {
    /// Run the request and fold the outcome into a completion event
    pub async fn run(self, client: &dyn DaemonClient, job_limit: usize) -> Event {
        let outcome = match self {
            Fetch::Jobs => client.fetch_jobs(job_limit).await.map(Event::JobsFetched),
            Fetch::Status => client.fetch_status().await.map(Event::StatusFetched),
            Fetch::Review(job_id) => client.fetch_review(job_id).await.map(Event::ReviewFetched),
        };
        outcome.unwrap_or_else(Event::FetchFailed)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

/// Launches fetches as fire-and-forget tasks feeding the reducer's channel
#[derive(Clone)]
pub struct Dispatcher {
    client: Arc<dyn DaemonClient>,
    tx: mpsc::Sender<Event>,
    job_limit: usize,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn DaemonClient>, tx: mpsc::Sender<Event>, job_limit: usize) -> Self {
        Self {
            client,
            tx,
            job_limit,
        }
    }

    /// Spawn `fetch`; its completion event is sent once it finishes
    pub fn spawn(&self, fetch: Fetch) -> tokio::task::JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let tx = self.tx.clone();
        let job_limit = self.job_limit;

        tokio::spawn(async move {
            let event = fetch.run(client.as_ref(), job_limit).await;
            if tx.send(event).await.is_err() {
                tracing::debug!(?fetch, "dashboard closed before fetch completed");
            }
        })
    }
}
