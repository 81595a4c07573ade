//! Rate limiting middleware using token bucket algorithm

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use datahub_common::errors::{AppError, Result};
use governor::{
    clock::QuantaClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiter using governor crate
pub type GlobalRateLimiter = RateLimiter<NotKeyed, InMemoryState, QuantaClock>;

/// Shared limiter plus the configured rate, reported back on rejection
#[derive(Clone)]
pub struct RateLimitState {
    limiter: Arc<GlobalRateLimiter>,
    requests_per_second: u32,
}

impl RateLimitState {
    pub fn new(requests_per_second: u32, burst: u32) -> Self {
        Self {
            limiter: create_rate_limiter(requests_per_second, burst),
            requests_per_second,
        }
    }
}

/// Create a new rate limiter. Zero values are clamped to one.
pub fn create_rate_limiter(requests_per_second: u32, burst: u32) -> Arc<GlobalRateLimiter> {
    let rate = NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN);
    let burst = NonZeroU32::new(burst).unwrap_or(NonZeroU32::MIN);

    Arc::new(RateLimiter::direct(Quota::per_second(rate).allow_burst(burst)))
}

/// Rate limiting middleware
pub async fn rate_limit_middleware(
    State(limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    match limit.limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!(path = %request.uri().path(), "Rate limit exceeded");
            Err(AppError::RateLimited {
                limit: limit.requests_per_second,
            })
        }
    }
}
