//! # HttpDaemon Tests
//!
//! A bare tokio listener plays the daemon and answers each request with a
//! canned HTTP/1.1 response, recording the request line it received.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use url::Url;

use roborev_tui::tui::runtime::{DaemonClient, HttpDaemon};
use roborev_tui::{FetchError, JobStatus};

// ============================================================================
// TEST HELPERS
// ============================================================================

/// Canned daemon answering every request with `status` and `body`
async fn serve(status: &'static str, body: &'static str) -> (Url, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => buf.extend_from_slice(&chunk[..n]),
                }
            }
            let request = String::from_utf8_lossy(&buf);
            if let Some(line) = request.lines().next() {
                seen.lock().unwrap().push(line.to_string());
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), requests)
}

fn client(url: Url) -> HttpDaemon {
    HttpDaemon::new(url, Duration::from_secs(5)).unwrap()
}

// ============================================================================
// Jobs
// ============================================================================

#[tokio::test]
async fn test_fetch_jobs_decodes_list_and_sends_limit() {
    let body = r#"{"jobs": [
        {"id": 12, "git_ref": "abc1234", "repo_name": "roborev", "agent": "codex",
         "status": "running", "started_at": "2025-03-01T09:29:00Z"},
        {"id": 11, "git_ref": "def5678", "repo_name": "roborev", "agent": "codex",
         "status": "failed", "error": "agent timed out"}
    ]}"#;
    let (url, requests) = serve("200 OK", body).await;

    let jobs = client(url).fetch_jobs(25).await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].status, JobStatus::Running);
    assert!(jobs[0].started_at.is_some());
    assert_eq!(jobs[1].error.as_deref(), Some("agent timed out"));

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0], "GET /api/jobs?limit=25 HTTP/1.1");
}

#[tokio::test]
async fn test_null_jobs_is_empty_list() {
    let (url, _) = serve("200 OK", r#"{"jobs": null}"#).await;
    assert!(client(url).fetch_jobs(50).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_status_is_preserved() {
    let (url, _) = serve("200 OK", r#"{"jobs": [{"id": 1, "status": "canceled"}]}"#).await;
    let jobs = client(url).fetch_jobs(50).await.unwrap();
    assert_eq!(jobs[0].status, JobStatus::Unknown("canceled".to_string()));
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_fetch_status() {
    let body = r#"{"active_workers": 3, "max_workers": 4, "queued_jobs": 7,
                   "running_jobs": 3, "completed_jobs": 120, "failed_jobs": 2,
                   "version": "0.9.1"}"#;
    let (url, requests) = serve("200 OK", body).await;

    let status = client(url).fetch_status().await.unwrap();
    assert_eq!(status.active_workers, 3);
    assert_eq!(status.completed_jobs, 120);
    assert_eq!(requests.lock().unwrap()[0], "GET /api/status HTTP/1.1");
}

#[tokio::test]
async fn test_server_error_is_status_failure() {
    let (url, _) = serve("500 Internal Server Error", "{}").await;
    let err = client(url).fetch_status().await.unwrap_err();
    assert_eq!(
        err,
        FetchError::Status {
            status: 500,
            endpoint: "/api/status".to_string(),
        }
    );
}

// ============================================================================
// Reviews
// ============================================================================

#[tokio::test]
async fn test_fetch_review() {
    let body = r#"{"agent": "codex", "output": "No issues.",
                   "job": {"id": 5, "git_ref": "abc1234", "status": "done"}}"#;
    let (url, requests) = serve("200 OK", body).await;

    let review = client(url).fetch_review(5).await.unwrap();
    assert_eq!(review.output, "No issues.");
    assert_eq!(review.job.map(|j| j.git_ref), Some("abc1234".to_string()));
    assert_eq!(requests.lock().unwrap()[0], "GET /api/review?job_id=5 HTTP/1.1");
}

#[tokio::test]
async fn test_missing_review_is_not_found() {
    let (url, _) = serve("404 Not Found", r#"{"error": "not found"}"#).await;
    let err = client(url).fetch_review(99).await.unwrap_err();
    assert_eq!(err, FetchError::NotFound { job_id: 99 });
}

#[tokio::test]
async fn test_404_on_jobs_is_status_failure() {
    let (url, _) = serve("404 Not Found", "{}").await;
    let err = client(url).fetch_jobs(50).await.unwrap_err();
    assert!(matches!(err, FetchError::Status { status: 404, .. }));
}

// ============================================================================
// Transport and decoding failures
// ============================================================================

#[tokio::test]
async fn test_malformed_body_is_decode_failure() {
    let (url, _) = serve("200 OK", "<html>not json</html>").await;
    let err = client(url).fetch_jobs(50).await.unwrap_err();
    match err {
        FetchError::Decode { endpoint, .. } => assert_eq!(endpoint, "/api/jobs"),
        other => panic!("expected decode failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_closed_port_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = Url::parse(&format!("http://{addr}")).unwrap();
    let err = client(url).fetch_status().await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
    assert!(err.to_string().starts_with("cannot reach daemon"));
}

#[tokio::test]
async fn test_silent_daemon_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without answering
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let url = Url::parse(&format!("http://{addr}")).unwrap();
    let daemon = HttpDaemon::new(url, Duration::from_millis(200)).unwrap();
    let err = daemon.fetch_jobs(50).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}
