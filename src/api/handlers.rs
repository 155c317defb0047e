//! HTTP API handlers for the root, health, status and metrics endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use serde_json::json;
use tracing::warn;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::{ApiError, ErrorBody};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration.
    pub config: Arc<Config>,
    /// Prometheus handle, present once the recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            metrics: None,
        }
    }

    /// Attach an installed Prometheus recorder.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Root response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Welcome text.
    pub message: String,
    /// Service version.
    pub version: String,
    /// Deployment environment.
    pub environment: String,
    /// Location of the interactive API docs.
    #[schema(value_type = String)]
    pub docs: &'static str,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy".
    #[schema(value_type = String)]
    pub status: &'static str,
    /// Human-readable summary.
    pub message: String,
    /// Service version.
    pub version: String,
    /// Database connectivity.
    #[schema(value_type = String)]
    pub database: &'static str,
    /// Time the check ran.
    pub timestamp: DateTime<Utc>,
}

/// Status response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// "operational".
    #[schema(value_type = String)]
    pub status: &'static str,
    /// API version segment.
    #[schema(value_type = String)]
    pub api_version: &'static str,
    /// Deployment environment.
    pub environment: String,
    /// Time the status was produced.
    pub timestamp: DateTime<Utc>,
}

/// Root handler - static welcome metadata.
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses((status = 200, description = "Welcome metadata", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse {
        message: format!("Welcome to the {}!", state.config.project_name),
        version: state.config.app_version.clone(),
        environment: state.config.environment.to_string(),
        docs: "/docs",
    })
}

/// Stand-in for a real dependency probe. No database is configured, so this
/// always succeeds and the 503 branch in [`health`] is unreachable.
async fn probe_dependencies() -> Result<(), String> {
    Ok(())
}

/// Health check handler - 200 if healthy, 503 otherwise.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = ErrorBody)
    )
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let version = state.config.app_version.clone();

    if let Err(reason) = probe_dependencies().await {
        warn!(%reason, "health check failed");
        return Err(ApiError::Http {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: json!({
                "status": "unhealthy",
                "message": format!("Service is unhealthy: {reason}"),
                "version": version,
                "database": "disconnected",
            }),
        });
    }

    Ok(Json(HealthResponse {
        status: "healthy",
        message: format!("{} service is healthy!", state.config.project_name),
        version,
        database: "connected",
        timestamp: Utc::now(),
    }))
}

/// Status handler - static operational metadata.
#[utoipa::path(
    get,
    path = "/api/v1/status",
    tag = "status",
    responses((status = 200, description = "Operational status", body = StatusResponse))
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "operational",
        api_version: "v1",
        environment: state.config.environment.to_string(),
        timestamp: Utc::now(),
    })
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let handle = state.metrics.ok_or_else(|| ApiError::Http {
        status: StatusCode::SERVICE_UNAVAILABLE,
        detail: json!("metrics recorder not installed"),
    })?;

    Ok(handle.render())
}
