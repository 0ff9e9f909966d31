//! Mock Daemon - For testing and demo purposes
//!
//! Serves canned jobs, status and reviews, and counts the calls it receives.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use super::DaemonClient;
use crate::error::FetchError;
use crate::types::{DaemonStatus, Job, JobStatus, Review};

/// Requests seen by a [`MockDaemon`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub jobs: usize,
    pub status: usize,
    pub reviews: usize,
    pub last_limit: Option<usize>,
}

/// In-memory daemon with fixed responses
#[derive(Debug, Default)]
pub struct MockDaemon {
    jobs: Vec<Job>,
    status: DaemonStatus,
    reviews: HashMap<i64, Review>,
    failure: Option<FetchError>,
    calls: Mutex<CallCounts>,
}

impl MockDaemon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(mut self, jobs: Vec<Job>) -> Self {
        self.jobs = jobs;
        self
    }

    pub fn with_status(mut self, status: DaemonStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_review(mut self, job_id: i64, review: Review) -> Self {
        self.reviews.insert(job_id, review);
        self
    }

    /// Make every request fail with `error`
    pub fn failing(mut self, error: FetchError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Snapshot of the calls received so far
    pub fn calls(&self) -> CallCounts {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, update: impl FnOnce(&mut CallCounts)) -> Result<(), FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            update(&mut calls);
        }
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    /// A small sample queue for `--demo`
    pub fn demo() -> Self {
        let now = Utc::now();
        let done = Job::new(3, JobStatus::Done)
            .with_ref("4f9c2d1")
            .with_repo("roborev")
            .with_agent("codex")
            .with_times(
                Some(now - Duration::seconds(300)),
                Some(now - Duration::seconds(212)),
            );
        let failed = Job::new(2, JobStatus::Failed)
            .with_ref("a1b2c3d..e4f5a6b")
            .with_repo("storage-engine-experiments")
            .with_agent("claude-code")
            .with_times(
                Some(now - Duration::seconds(900)),
                Some(now - Duration::seconds(890)),
            )
            .with_error("agent exited with status 1: context window exceeded");

        let review = Review {
            agent: "codex".to_string(),
            output: "No high severity issues found.\n\n\
                     - low: `wrap_text` allocates a fresh Vec<char> per input line; \
                     fine for review sized output but worth noting if this is ever \
                     used on large logs.\n\
                     - low: the poll interval is not validated against the request \
                     timeout, so a slow daemon can have several polls in flight."
                .to_string(),
            job: Some(done.clone()),
        };

        Self::new()
            .with_jobs(vec![
                Job::new(5, JobStatus::Queued)
                    .with_ref("HEAD")
                    .with_repo("roborev")
                    .with_agent("codex"),
                Job::new(4, JobStatus::Running)
                    .with_ref("9e8d7c6")
                    .with_repo("roborev")
                    .with_agent("claude-code")
                    .with_times(Some(now - Duration::seconds(42)), None),
                done,
                failed,
            ])
            .with_status(DaemonStatus {
                active_workers: 1,
                max_workers: 4,
                queued_jobs: 1,
                running_jobs: 1,
                completed_jobs: 1,
                failed_jobs: 1,
            })
            .with_review(3, review)
    }
}

#[async_trait]
impl DaemonClient for MockDaemon {
    async fn fetch_jobs(&self, limit: usize) -> Result<Vec<Job>, FetchError> {
        self.record(|calls| {
            calls.jobs += 1;
            calls.last_limit = Some(limit);
        })?;
        Ok(self.jobs.iter().take(limit).cloned().collect())
    }

    async fn fetch_status(&self) -> Result<DaemonStatus, FetchError> {
        self.record(|calls| calls.status += 1)?;
        Ok(self.status.clone())
    }

    async fn fetch_review(&self, job_id: i64) -> Result<Review, FetchError> {
        self.record(|calls| calls.reviews += 1)?;
        self.reviews
            .get(&job_id)
            .cloned()
            .ok_or(FetchError::NotFound { job_id })
    }
}
