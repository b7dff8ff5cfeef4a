use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::sync::Mutex;
use tracing::warn;

use crate::errors::AppError;
use crate::state::AppState;

/// Process-wide token bucket. Holds `rps` tokens at most and refills `rps`
/// tokens per second.
#[derive(Clone)]
pub struct RateLimiter {
    rps: u32,
    bucket: Arc<Mutex<Bucket>>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last: Instant,
}

impl RateLimiter {
    pub fn new(rps: u32) -> Self {
        Self {
            rps,
            bucket: Arc::new(Mutex::new(Bucket {
                tokens: rps as f64,
                last: Instant::now(),
            })),
        }
    }

    /// Takes one token, or returns how long until one is available.
    pub async fn check(&self) -> Result<(), Duration> {
        let mut bucket = self.bucket.lock().await;
        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last);
        bucket.last = now;

        let capacity = self.rps as f64;
        bucket.tokens = (bucket.tokens + elapsed.as_secs_f64() * capacity).min(capacity);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            return Ok(());
        }

        Err(Duration::from_secs_f64((1.0 - bucket.tokens) / capacity))
    }
}

/// Route middleware rejecting requests with 429 once the bucket is empty.
/// A no-op when `RATE_LIMIT_RPS` is unset.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(limiter) = &state.rate_limiter {
        if let Err(wait) = limiter.check().await {
            warn!("Rate limit exceeded on {}", request.uri().path());
            return Err(AppError::RateLimited(format!(
                "Too many requests: try again in ~{}ms",
                wait.as_millis().max(1)
            )));
        }
    }
    Ok(next.run(request).await)
}
