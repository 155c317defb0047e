//! HTTP API route definitions.

use axum::http::{HeaderValue, Method, Uri};
use axum::extract::OriginalUri;
use axum::response::Redirect;
use axum::{middleware, routing::get, Router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{health, metrics, root, status, AppState};
use super::openapi::ApiDoc;
use super::users::{get_user, list_items, list_users, search_users};
use crate::config::Config;
use crate::error::ApiError;
use crate::metrics::track_http_metrics;
use crate::middleware::{enforce_rate_limit, RateLimiter};

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let limiter = RateLimiter::from_config(&state.config);
    let cors = cors_layer(&state.config);
    let prefix = state.config.api_v1_prefix.clone();

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest(&prefix, v1_router())
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(limiter, enforce_rate_limit))
        .layer(middleware::from_fn(track_http_metrics))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Versioned API routes, relative to the configured prefix.
fn v1_router() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/users", get(redirect_trailing_slash))
        .route("/users/", get(list_users))
        .route("/users/search/", get(search_users))
        .route("/users/items/", get(list_items))
        // The static `search/` and `items/` entries shadow `:user_id` for
        // these two segments, so route them to the id lookup explicitly.
        .route("/users/search", get(non_integer_user_id))
        .route("/users/items", get(non_integer_user_id))
        .route("/users/:user_id", get(get_user))
}

/// Same rejection `/users/:user_id` gives for a non-integer segment.
async fn non_integer_user_id(OriginalUri(uri): OriginalUri) -> ApiError {
    let segment = uri.path().rsplit('/').next().unwrap_or_default();
    ApiError::Validation {
        detail: format!("Cannot parse `{segment}` to a `i64`"),
    }
}

/// Temporary redirect to the same path with a trailing `/`, keeping the query.
async fn redirect_trailing_slash(OriginalUri(uri): OriginalUri) -> Redirect {
    let target = match uri.query() {
        Some(query) => format!("{}/?{}", uri.path(), query),
        None => format!("{}/", uri.path()),
    };
    Redirect::temporary(&target)
}

/// CORS policy from the configured origins.
pub fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return base.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .backend_cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound {
        path: uri.path().to_string(),
    }
}
