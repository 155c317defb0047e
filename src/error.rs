//! Unified error types for the scaffold service.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Startup and configuration errors.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients as structured JSON bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Path or query parameters failed type coercion.
    #[error("validation error: {detail}")]
    Validation {
        /// What failed to parse.
        detail: String,
    },

    /// Error raised deliberately by a handler.
    #[error("http error {status}")]
    Http {
        /// Status code to respond with.
        status: StatusCode,
        /// Detail payload supplied at the raise site.
        detail: Value,
    },

    /// Client exceeded its request budget.
    #[error("rate limited: retry after {retry_after}s")]
    RateLimited {
        /// Seconds until the window resets.
        retry_after: u64,
    },

    /// No route matched the request.
    #[error("no route for {path}")]
    NotFound {
        /// Requested path.
        path: String,
    },
}

/// JSON body written for every [`ApiError`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `true`.
    pub error: bool,
    /// HTTP status code, repeated in the body.
    pub status_code: u16,
    /// Short human-readable summary.
    pub message: String,
    /// Offending detail.
    #[schema(value_type = Object)]
    pub detail: Value,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Http { status, .. } => *status,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn body(&self) -> ErrorBody {
        let status = self.status_code();
        let (message, detail) = match self {
            Self::Validation { detail } => ("Validation error".to_string(), Value::from(detail.as_str())),
            Self::Http { detail, .. } => (
                status.canonical_reason().unwrap_or("HTTP error").to_string(),
                detail.clone(),
            ),
            Self::RateLimited { retry_after } => (
                "Rate limit exceeded".to_string(),
                Value::from(format!("retry after {retry_after}s")),
            ),
            Self::NotFound { path } => ("Not Found".to_string(), Value::from(path.as_str())),
        };

        ErrorBody {
            error: true,
            status_code: status.as_u16(),
            message,
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(self.body())).into_response();

        if let Self::RateLimited { retry_after } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        }

        response
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation {
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation {
            detail: rejection.body_text(),
        }
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
