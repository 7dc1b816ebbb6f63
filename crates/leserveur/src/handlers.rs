//! HTTP handlers and request orchestration
//!
//! The factorization endpoint runs a linear pipeline: auth check, body
//! decode and shape validation, factorization, downstream statistics call,
//! response assembly. Only the first two stages can reject the request; a
//! downstream failure degrades the response instead of failing it.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap},
    Json, Router,
};
use lematrice::{qr_factorize, Matrix};
use lestats::StatsClient;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{debug, info, warn};

use crate::auth::JwtVerifier;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::responses::{FactorPair, QrResponse, StatisticsSection};

/// Request body for the factorization endpoint
#[derive(Debug, Deserialize)]
pub struct QrRequest {
    /// The matrix to factor
    pub matrix: MatrixPayload,
}

/// Matrix envelope as sent by clients
#[derive(Debug, Deserialize)]
pub struct MatrixPayload {
    /// Row-major values; validated for rectangularity after decoding
    pub data: Vec<Vec<f64>>,
}

/// State shared across all handlers
///
/// Everything here is immutable after startup, so requests share it without
/// locks: the token verifier wraps the read-only signing secret and the
/// stats client holds a pooled connection.
#[derive(Clone)]
pub struct AppState {
    /// Bearer-token verifier built from the configured secret
    pub verifier: Arc<JwtVerifier>,

    /// Client for the downstream statistics service
    pub stats: Arc<StatsClient>,
}

impl AppState {
    /// Build application state from configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let stats = StatsClient::new(&config.stats_url, config.stats_timeout_secs)
            .map_err(|e| ApiError::internal(format!("Failed to build stats client: {}", e)))?;

        Ok(Self {
            verifier: Arc::new(JwtVerifier::new(&config.jwt_secret)),
            stats: Arc::new(stats),
        })
    }
}

/// POST /api/qr-with-stats - Factor a matrix and enrich with statistics
pub async fn qr_with_stats(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<QrRequest>, JsonRejection>,
) -> ApiResult<Json<QrResponse>> {
    // Auth gate comes first: a bad credential must short-circuit before any
    // decoding or computation happens.
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Authorization token required"))?;

    let claims = state.verifier.verify_header(auth_header)?;
    debug!("Request admitted for user: {}", claims.username);

    let Json(request) =
        body.map_err(|e| ApiError::bad_request(format!("Failed to parse matrix: {}", e)))?;

    let matrix =
        Matrix::from_rows(request.matrix.data).map_err(|e| ApiError::bad_request(e.to_string()))?;

    info!(
        "Factoring {}x{} matrix",
        matrix.row_count(),
        matrix.col_count()
    );
    let (q, r) = qr_factorize(&matrix);

    // The caller's credential is forwarded verbatim; a downstream failure is
    // logged and the response degrades to factorization-only.
    let statistics = match state.stats.summarize(&q, &r, auth_header).await {
        Ok(summary) => Some(StatisticsSection::from(summary)),
        Err(e) => {
            warn!("Statistics service unavailable: {}", e);
            None
        }
    };

    Ok(Json(QrResponse {
        success: true,
        result: FactorPair { q, r },
        message: "QR factorization completed successfully".to_string(),
        statistics,
    }))
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "leserveur",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Create router with all API endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/qr-with-stats", axum::routing::post(qr_with_stats))
        .route("/health", axum::routing::get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
