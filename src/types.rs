//! Wire types for the review daemon API
//!
//! Snapshots only. The dashboard never mutates a job or review it received.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a review job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    Queued,
    Running,
    Done,
    Failed,
    /// A status label this client does not know about
    Unknown(String),
}

impl JobStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Unknown(raw) => raw,
        }
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "queued" => Self::Queued,
            "running" => Self::Running,
            "done" => Self::Done,
            "failed" => Self::Failed,
            _ => Self::Unknown(raw),
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Unknown(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A unit of review work tracked by the daemon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    #[serde(default)]
    pub git_ref: String,
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub agent: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Job {
    /// Create a job with no timestamps or error
    pub fn new(id: i64, status: JobStatus) -> Self {
        Self {
            id,
            git_ref: String::new(),
            repo_name: String::new(),
            agent: String::new(),
            status,
            started_at: None,
            finished_at: None,
            error: None,
        }
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = git_ref.into();
        self
    }

    pub fn with_repo(mut self, repo_name: impl Into<String>) -> Self {
        self.repo_name = repo_name.into();
        self
    }

    pub fn with_agent(mut self, agent: impl Into<String>) -> Self {
        self.agent = agent.into();
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_times(
        mut self,
        started_at: Option<DateTime<Utc>>,
        finished_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.started_at = started_at;
        self.finished_at = finished_at;
        self
    }
}

/// Aggregate worker and queue counters reported by the daemon
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonStatus {
    pub active_workers: u32,
    pub max_workers: u32,
    pub queued_jobs: u32,
    pub running_jobs: u32,
    pub completed_jobs: u32,
    pub failed_jobs: u32,
}

/// Textual output produced for a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub agent: String,
    #[serde(default)]
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job: Option<Job>,
}

impl Review {
    /// Build a review locally from a failed job's stored error text
    pub fn for_failed_job(job: &Job) -> Self {
        Self {
            agent: job.agent.clone(),
            output: format!("Job failed:\n\n{}", job.error.as_deref().unwrap_or_default()),
            job: Some(job.clone()),
        }
    }
}

/// Body of `GET /api/jobs`
#[derive(Debug, Default, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Option<Vec<Job>>,
}

impl JobList {
    pub fn into_jobs(self) -> Vec<Job> {
        self.jobs.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_status_parse() {
        assert_eq!(JobStatus::from("done".to_string()), JobStatus::Done);
        assert_eq!(JobStatus::from("failed".to_string()), JobStatus::Failed);
        assert_eq!(
            JobStatus::from("canceled".to_string()),
            JobStatus::Unknown("canceled".to_string())
        );
        assert_eq!(JobStatus::Running.to_string(), "running");
    }

    #[test]
    fn test_job_deserialize_with_daemon_fields() {
        let json = r#"{
            "id": 12,
            "repo_id": 3,
            "git_ref": "abc1234",
            "agent": "codex",
            "status": "running",
            "enqueued_at": "2025-01-10T12:00:00Z",
            "started_at": "2025-01-10T12:00:05Z",
            "repo_name": "roborev"
        }"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.id, 12);
        assert_eq!(job.status, JobStatus::Running);
        assert_eq!(job.repo_name, "roborev");
        assert!(job.started_at.is_some());
        assert!(job.finished_at.is_none());
        assert!(job.error.is_none());
    }

    #[test]
    fn test_job_list_null_jobs() {
        let list: JobList = serde_json::from_str(r#"{"jobs": null}"#).unwrap();
        assert!(list.into_jobs().is_empty());
    }

    #[test]
    fn test_status_defaults_missing_fields() {
        let status: DaemonStatus = serde_json::from_str(r#"{"max_workers": 4}"#).unwrap();
        assert_eq!(status.max_workers, 4);
        assert_eq!(status.active_workers, 0);
    }

    #[test]
    fn test_review_for_failed_job() {
        let job = Job::new(7, JobStatus::Failed)
            .with_agent("claude")
            .with_error("panic: nil pointer");
        let review = Review::for_failed_job(&job);
        assert_eq!(review.agent, "claude");
        assert!(review.output.starts_with("Job failed:\n\npanic: nil pointer"));
        assert_eq!(review.job.as_ref().map(|j| j.id), Some(7));
    }
}
