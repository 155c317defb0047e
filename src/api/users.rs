//! User and item endpoints, mounted under the versioned API prefix.

use axum::Json;
use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use super::data::{slice_window, Item, ITEMS, USERS};
use super::params::{ApiPath, QueryParams};

/// Echo of a requested user id.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub user_id: i64,
}

/// Echo of the search query.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResponse {
    pub q: Option<String>,
}

/// A page of items.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemsResponse {
    /// Present only when a non-empty query was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub items: Vec<Item>,
}

/// List all users.
#[utoipa::path(
    get,
    path = "/api/v1/users/",
    tag = "users",
    responses((status = 200, description = "User names", body = [String]))
)]
pub async fn list_users() -> Json<[&'static str; 2]> {
    Json(USERS)
}

/// Fetch a user by id. There is no user store, so the id is echoed back.
#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Requested id", body = UserResponse),
        (status = 422, description = "Non-integer id", body = crate::error::ErrorBody)
    )
)]
pub async fn get_user(ApiPath(user_id): ApiPath<i64>) -> Json<UserResponse> {
    Json(UserResponse { user_id })
}

/// Search users. Returns the parsed query without searching anything.
#[utoipa::path(
    get,
    path = "/api/v1/users/search/",
    tag = "users",
    params(QueryParams),
    responses((status = 200, description = "Echoed query", body = SearchResponse))
)]
pub async fn search_users(params: QueryParams) -> Json<SearchResponse> {
    Json(SearchResponse { q: params.q })
}

/// Page through the item catalogue.
#[utoipa::path(
    get,
    path = "/api/v1/users/items/",
    tag = "users",
    params(QueryParams),
    responses(
        (status = 200, description = "Item window", body = ItemsResponse),
        (status = 422, description = "Malformed skip or limit", body = crate::error::ErrorBody)
    )
)]
pub async fn list_items(params: QueryParams) -> Json<ItemsResponse> {
    let items = slice_window(&ITEMS, params.skip, params.limit).to_vec();
    debug!(skip = params.skip, limit = params.limit, returned = items.len(), "listing items");

    Json(ItemsResponse {
        q: params.non_empty_q().map(str::to_owned),
        items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn items_echo_non_empty_query_only() {
        let Json(with_q) = list_items(QueryParams {
            q: Some("foo".to_string()),
            ..QueryParams::default()
        })
        .await;
        assert_eq!(with_q.q.as_deref(), Some("foo"));
        assert_eq!(with_q.items.len(), 3);

        let Json(empty_q) = list_items(QueryParams {
            q: Some(String::new()),
            ..QueryParams::default()
        })
        .await;
        assert_eq!(empty_q.q, None);
    }

    #[tokio::test]
    async fn search_echoes_absent_query_as_none() {
        let Json(body) = search_users(QueryParams::default()).await;
        assert_eq!(body.q, None);
    }
}
