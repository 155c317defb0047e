//! Request extractors: common query parameters and typed path values.
//!
//! Both extractors turn axum's rejections into [`ApiError::Validation`] so a
//! malformed `?skip=abc` or `/users/abc` gets the same JSON error body as any
//! other failure.

use axum::async_trait;
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::request::Parts;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

use crate::error::ApiError;

/// Common paging and search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QueryParams {
    /// Free-text query, echoed back.
    pub q: Option<String>,
    /// Number of records to skip.
    #[serde(default, deserialize_with = "saturating_i64")]
    #[param(default = 0)]
    pub skip: i64,
    /// Maximum number of records to return.
    #[serde(default = "default_limit", deserialize_with = "saturating_i64")]
    #[param(default = 100)]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

/// Integer that pins to `i64::MIN`/`i64::MAX` instead of failing when the
/// digits do not fit. Anything that is not an integer is still rejected.
fn saturating_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Ok(value);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(de::Error::custom(format!("invalid integer {raw:?}")));
    }

    Ok(if negative { i64::MIN } else { i64::MAX })
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            q: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl QueryParams {
    /// The query text, if one was supplied and is non-empty.
    pub fn non_empty_q(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for QueryParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<QueryParams>::from_request_parts(parts, state).await?;
        Ok(params)
    }
}

/// Path extractor that rejects with [`ApiError::Validation`].
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
