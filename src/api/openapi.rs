//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::{data, handlers, users};
use crate::error::ErrorBody;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scaffold API",
        description = "A sample web project with a structured layout."
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::status,
        users::list_users,
        users::get_user,
        users::search_users,
        users::list_items,
    ),
    components(schemas(
        handlers::RootResponse,
        handlers::HealthResponse,
        handlers::StatusResponse,
        users::UserResponse,
        users::SearchResponse,
        users::ItemsResponse,
        data::Item,
        ErrorBody,
    )),
    tags(
        (name = "root", description = "Service metadata"),
        (name = "health", description = "Liveness"),
        (name = "status", description = "Operational status"),
        (name = "users", description = "Users and items")
    )
)]
pub struct ApiDoc;

/// Pretty-printed OpenAPI JSON.
pub fn openapi_json() -> Result<String, serde_json::Error> {
    ApiDoc::openapi().to_pretty_json()
}
