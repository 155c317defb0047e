//! HTTP API: root, health, status, users and items.

pub mod data;
pub mod handlers;
pub mod openapi;
pub mod params;
pub mod routes;
pub mod users;

pub use handlers::AppState;
pub use params::QueryParams;
pub use routes::create_router;
