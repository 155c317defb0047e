//! Minimal web-application scaffold.
//!
//! A handful of JSON endpoints served by axum: service metadata, a health
//! check, operational status, and a small users/items surface backed by
//! static in-memory data.
//!
//! ```text
//! GET /                          welcome metadata
//! GET /health                    health payload with timestamp
//! GET /api/v1/status             operational status
//! GET /api/v1/users/             ["shuvam", "dutta"]
//! GET /api/v1/users/{user_id}    {"user_id": ...}
//! GET /api/v1/users/search/      {"q": ...}
//! GET /api/v1/users/items/       paged items
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Startup errors and JSON error responses
//! - [`api`]: Handlers, extractors and router assembly
//! - [`middleware`]: Rate limiting
//! - [`metrics`]: Prometheus request metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, AppError, Result};
