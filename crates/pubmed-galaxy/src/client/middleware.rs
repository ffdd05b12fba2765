//! Request gating middleware for the E-utilities client.
//!
//! [`IntervalLimiter`] enforces a minimum spacing between outbound requests.
//! It is an explicit object owned by one client: clones of that client share
//! it, independently built clients never do. [`RateLimitMiddleware`] sits
//! innermost in the middleware stack, so every attempt (retries included)
//! waits for the gate right before it leaves the process.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use http::Extensions;
use reqwest::{Request, Response};
use reqwest_middleware::{Middleware, Next};

/// Single-slot cooldown: at most one request per `interval`.
pub struct IntervalLimiter {
    interval: Duration,
    gate: Option<DefaultDirectRateLimiter>,
}

impl IntervalLimiter {
    /// Create a limiter. A zero interval never waits.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        let gate = Quota::with_period(interval)
            .map(|quota| RateLimiter::direct(quota.allow_burst(NonZeroU32::MIN)));
        Self { interval, gate }
    }

    /// Wait until the next request may leave, then claim the slot.
    pub async fn acquire(&self) {
        if let Some(gate) = &self.gate {
            gate.until_ready().await;
        }
    }

    /// Configured minimum spacing.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl std::fmt::Debug for IntervalLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntervalLimiter").field("interval", &self.interval).finish()
    }
}

/// Middleware that waits on an [`IntervalLimiter`] before each request.
#[derive(Debug, Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<IntervalLimiter>,
}

impl RateLimitMiddleware {
    /// Wrap a shared limiter.
    #[must_use]
    pub fn new(limiter: Arc<IntervalLimiter>) -> Self {
        Self { limiter }
    }
}

#[async_trait::async_trait]
impl Middleware for RateLimitMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        self.limiter.acquire().await;
        tracing::trace!(url = %req.url(), "Request cleared rate limiter");
        next.run(req, extensions).await
    }
}
