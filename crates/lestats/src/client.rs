//! HTTP client for the downstream statistics service
//!
//! The collaborator receives the factor pair and replies with aggregate
//! statistics over both matrices. Every failure mode of this call (transport,
//! timeout, non-200 status, undecodable body, reported failure) collapses into
//! [`StatsError`]; callers treat the enrichment as optional and degrade.

use lematrice::Matrix;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default timeout for the statistics call, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Errors from the statistics call
///
/// Non-fatal by contract: the orchestrator logs these and responds without
/// the statistics section.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Connection, timeout, or response decoding failure
    #[error("Statistics request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a status other than 200
    #[error("Statistics service returned status {0}")]
    BadStatus(u16),

    /// The service answered 200 but reported a failure in the body
    #[error("Statistics service reported failure: {0}")]
    Rejected(String),
}

/// Request body: the two factor matrices, in order
#[derive(Debug, Serialize)]
struct StatsRequest<'a> {
    matrices: [&'a Matrix; 2],
}

/// Aggregate statistics computed by the collaborator over both matrices
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    /// Whether the collaborator considers the computation successful
    pub success: bool,

    /// Largest value across both matrices
    pub max_value: f64,

    /// Smallest value across both matrices
    pub min_value: f64,

    /// Mean of all values
    pub promedio: f64,

    /// Sum of all values
    pub total_sum: f64,

    /// Whether every matrix is (square and) diagonal
    pub is_diagonal: bool,

    /// Total number of elements inspected
    pub total_elements: u64,

    /// Human-readable status message
    #[serde(default)]
    pub message: String,
}

/// Client for the statistics collaborator
///
/// Holds a pooled `reqwest::Client` with a bounded request timeout; cheap to
/// clone and safe to share across request handlers.
#[derive(Debug, Clone)]
pub struct StatsClient {
    client: Client,
    base_url: String,
}

impl StatsClient {
    /// Create a client for the service at `base_url`
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the statistics service, with or without a
    ///   trailing slash
    /// * `timeout_secs` - Upper bound for the whole request, connect included
    ///
    /// # Returns
    ///
    /// `Result<StatsClient, StatsError>` - Client or TLS/backend setup error
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self, StatsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    /// Send the factor pair and fetch the statistics summary
    ///
    /// POSTs `{"matrices": [Q, R]}` to `<base-url>/api/stats`. The caller's
    /// original `Authorization` header is forwarded verbatim; this client
    /// never derives or reissues credentials.
    ///
    /// # Arguments
    ///
    /// * `q` - Orthogonal-columns factor
    /// * `r` - Upper-triangular factor
    /// * `auth_header` - Raw `Authorization` header value from the inbound request
    ///
    /// # Returns
    ///
    /// `Ok(StatsSummary)` only for a 200 response whose body decodes and
    /// reports `success: true`
    pub async fn summarize(
        &self,
        q: &Matrix,
        r: &Matrix,
        auth_header: &str,
    ) -> Result<StatsSummary, StatsError> {
        let url = format!("{}/api/stats", self.base_url);
        debug!("Requesting statistics from {}", url);

        let response = self
            .client
            .post(&url)
            .header(header::AUTHORIZATION, auth_header)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&StatsRequest { matrices: [q, r] })
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(StatsError::BadStatus(status.as_u16()));
        }

        let summary: StatsSummary = response.json().await?;
        if !summary.success {
            return Err(StatsError::Rejected(summary.message));
        }

        Ok(summary)
    }

    /// Base URL this client targets
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn factor_pair() -> (Matrix, Matrix) {
        let q = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]).expect("valid");
        let r = Matrix::from_rows(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).expect("valid");
        (q, r)
    }

    #[test]
    fn test_request_wire_format() {
        let (q, r) = factor_pair();
        let payload = StatsRequest { matrices: [&q, &r] };
        let json = serde_json::to_value(&payload).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "matrices": [
                    [[1.0, 0.0], [0.0, 1.0]],
                    [[1.0, 1.0], [0.0, 1.0]],
                ]
            })
        );
    }

    #[test]
    fn test_summary_decodes_reference_body() {
        let body = r#"{
            "success": true,
            "maxValue": 1.0,
            "minValue": 0.0,
            "promedio": 0.625,
            "totalSum": 5.0,
            "isDiagonal": false,
            "totalElements": 8,
            "message": "ok"
        }"#;
        let summary: StatsSummary = serde_json::from_str(body).expect("decodable");
        assert!(summary.success);
        assert_eq!(summary.max_value, 1.0);
        assert_eq!(summary.promedio, 0.625);
        assert_eq!(summary.total_elements, 8);
        assert!(!summary.is_diagonal);
    }

    #[test]
    fn test_summary_message_defaults_empty() {
        let body = r#"{
            "success": false,
            "maxValue": 0.0,
            "minValue": 0.0,
            "promedio": 0.0,
            "totalSum": 0.0,
            "isDiagonal": true,
            "totalElements": 0
        }"#;
        let summary: StatsSummary = serde_json::from_str(body).expect("decodable");
        assert!(!summary.success);
        assert!(summary.message.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = StatsClient::new("http://localhost:3000/", DEFAULT_TIMEOUT_SECS)
            .expect("client builds");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        // Port 9 (discard) is assumed closed; connection is refused immediately
        let client = StatsClient::new("http://127.0.0.1:9", 1).expect("client builds");
        let (q, r) = factor_pair();
        let result = client.summarize(&q, &r, "Bearer token").await;
        assert!(matches!(result, Err(StatsError::Transport(_))));
    }

    /// True once `buf` holds the request head plus the announced body length
    fn request_complete(buf: &[u8]) -> bool {
        let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..end]);
        let content_length = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        buf.len() >= end + 4 + content_length
    }

    /// Spawn a one-shot HTTP stub that answers every request with `response`
    async fn spawn_raw_stub(response: &'static str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("stub binds");
        let addr = listener.local_addr().expect("stub addr");

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => break,
                            Ok(n) => buf.extend_from_slice(&chunk[..n]),
                        }
                        if request_complete(&buf) {
                            break;
                        }
                    }
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_error_status_is_bad_status() {
        let base = spawn_raw_stub(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let client = StatsClient::new(base, 2).expect("client builds");
        let (q, r) = factor_pair();
        let result = client.summarize(&q, &r, "Bearer token").await;
        assert!(matches!(result, Err(StatsError::BadStatus(500))));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_transport_error() {
        let base = spawn_raw_stub(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 8\r\nconnection: close\r\n\r\nnot json",
        )
        .await;
        let client = StatsClient::new(base, 2).expect("client builds");
        let (q, r) = factor_pair();
        let result = client.summarize(&q, &r, "Bearer token").await;
        assert!(matches!(result, Err(StatsError::Transport(_))));
    }
}
