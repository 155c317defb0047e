//! Per-client fixed-window rate limiting.
//!
//! Counters live in process memory and are not shared between instances.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use dashmap::DashMap;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::ApiError;
use crate::metrics;

/// Key used when the peer address is unknown.
pub const ANONYMOUS_CLIENT: &str = "anonymous";

/// Result of an admitted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitOutcome {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Seconds until the window resets.
    pub reset_after: u64,
}

/// Result of a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitRejection {
    /// Seconds the client should wait before retrying.
    pub retry_after: u64,
}

#[derive(Debug, Clone)]
struct WindowEntry {
    count: u32,
    window_start: Instant,
}

/// Fixed-window rate limiter keyed by client.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    enabled: bool,
    limit: u32,
    window: Duration,
    entries: Arc<DashMap<String, WindowEntry>>,
    last_sweep: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create an enabled limiter allowing `limit` requests per `window`.
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            enabled: true,
            limit,
            window,
            entries: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Limiter that admits everything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(u32::MAX, Duration::from_secs(1))
        }
    }

    /// Build from configuration.
    pub fn from_config(config: &Config) -> Self {
        if config.rate_limit_enabled {
            Self::new(
                config.rate_limit_requests,
                Duration::from_secs(config.rate_limit_window_seconds),
            )
        } else {
            Self::disabled()
        }
    }

    /// Whether requests are being counted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Number of clients currently holding a window.
    pub fn tracked_clients(&self) -> usize {
        self.entries.len()
    }

    /// Drop expired windows, at most once per window length.
    fn sweep_expired(&self, now: Instant) {
        {
            let mut last = self.last_sweep.lock().unwrap_or_else(|e| e.into_inner());
            if now.saturating_duration_since(*last) < self.window {
                return;
            }
            *last = now;
        }

        let before = self.entries.len();
        self.entries
            .retain(|_, entry| now.saturating_duration_since(entry.window_start) < self.window);
        debug!(
            removed = before.saturating_sub(self.entries.len()),
            "swept expired rate limit windows"
        );
    }

    /// Count one request for `key` at time `now`.
    pub fn check_at(&self, key: &str, now: Instant) -> Result<RateLimitOutcome, RateLimitRejection> {
        // Must run before `entry()` takes a shard lock that `retain` also needs.
        self.sweep_expired(now);

        let mut entry = self.entries.entry(key.to_string()).or_insert(WindowEntry {
            count: 0,
            window_start: now,
        });

        // Reset window if expired
        if now.duration_since(entry.window_start) >= self.window {
            entry.count = 0;
            entry.window_start = now;
        }

        let reset_after = self
            .window
            .checked_sub(now.duration_since(entry.window_start))
            .unwrap_or(Duration::ZERO)
            .as_secs()
            .max(1);

        if entry.count >= self.limit {
            return Err(RateLimitRejection {
                retry_after: reset_after,
            });
        }

        entry.count += 1;
        Ok(RateLimitOutcome {
            remaining: self.limit - entry.count,
            reset_after,
        })
    }

    /// Count one request for `key` now.
    pub fn check(&self, key: &str) -> Result<RateLimitOutcome, RateLimitRejection> {
        self.check_at(key, Instant::now())
    }
}

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| ANONYMOUS_CLIENT.to_string())
}

/// Middleware rejecting clients that exceed their window budget.
pub async fn enforce_rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if !limiter.is_enabled() {
        return next.run(req).await;
    }

    let key = client_key(&req);
    match limiter.check(&key) {
        Ok(outcome) => {
            debug!(client = %key, remaining = outcome.remaining, "rate limit check passed");
            next.run(req).await
        }
        Err(rejection) => {
            warn!(client = %key, retry_after = rejection.retry_after, "rate limit exceeded");
            metrics::inc_rate_limited();
            ApiError::RateLimited {
                retry_after: rejection.retry_after,
            }
            .into_response()
        }
    }
}
