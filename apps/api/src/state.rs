use sqlx::PgPool;

use crate::config::Config;
use crate::rate_limit::RateLimiter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Present when `RATE_LIMIT_RPS` is set; guards the ATS routes.
    pub rate_limiter: Option<RateLimiter>,
}
