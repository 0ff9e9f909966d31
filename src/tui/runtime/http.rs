//! HTTP daemon client
//!
//! Talks JSON to the roborev daemon's read-only endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use super::DaemonClient;
use crate::error::FetchError;
use crate::types::{DaemonStatus, Job, JobList, Review};

const JOBS_PATH: &str = "/api/jobs";
const STATUS_PATH: &str = "/api/status";
const REVIEW_PATH: &str = "/api/review";

/// reqwest-backed [`DaemonClient`]
#[derive(Debug, Clone)]
pub struct HttpDaemon {
    client: reqwest::Client,
    base: Url,
}

impl HttpDaemon {
    pub fn new(server: Url, timeout: Duration) -> crate::error::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(concat!("roborev-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base: server,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base.as_str().trim_end_matches('/'), path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        not_found: Option<FetchError>,
    ) -> Result<T, FetchError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, ?query, "GET");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(error) = not_found {
                return Err(error);
            }
        }
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            endpoint: path.to_string(),
            details: e.to_string(),
        })
    }
}

#[async_trait]
impl DaemonClient for HttpDaemon {
    async fn fetch_jobs(&self, limit: usize) -> Result<Vec<Job>, FetchError> {
        let list: JobList = self
            .get_json(JOBS_PATH, &[("limit", limit.to_string())], None)
            .await?;
        Ok(list.into_jobs())
    }

    async fn fetch_status(&self) -> Result<DaemonStatus, FetchError> {
        self.get_json(STATUS_PATH, &[], None).await
    }

    async fn fetch_review(&self, job_id: i64) -> Result<Review, FetchError> {
        self.get_json(
            REVIEW_PATH,
            &[("job_id", job_id.to_string())],
            Some(FetchError::NotFound { job_id }),
        )
        .await
    }
}
