//! Static request quota and the inter-request delay derived from it.

use rand::Rng;
use std::time::Duration;

/// Documented quota of Clerk's Backend API user endpoints.
///
/// <https://clerk.com/docs/reference/backend-api/tag/Users>
pub const CLERK_USERS_RATE_LIMIT: RateLimit = RateLimit {
    requests_max: 20,
    duration_sec: 10.0,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RateLimitError {
    #[error(
        "invalid rate limit: requests_max must be positive and duration_sec positive and finite \
         (got requests_max={requests_max}, duration_sec={duration_sec})"
    )]
    InvalidRateLimit { requests_max: u32, duration_sec: f64 },
}

/// At most `requests_max` requests are permitted per `duration_sec` window.
///
/// A value of this type is always valid; [`RateLimit::new`] rejects zero
/// requests and non-positive durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateLimit {
    requests_max: u32,
    duration_sec: f64,
}

impl RateLimit {
    pub fn new(requests_max: u32, duration_sec: f64) -> Result<Self, RateLimitError> {
        if requests_max == 0 || !duration_sec.is_finite() || duration_sec <= 0.0 {
            return Err(RateLimitError::InvalidRateLimit {
                requests_max,
                duration_sec,
            });
        }
        Ok(Self {
            requests_max,
            duration_sec,
        })
    }

    pub fn requests_max(&self) -> u32 {
        self.requests_max
    }

    pub fn duration_sec(&self) -> f64 {
        self.duration_sec
    }

    /// Per-request spacing that can never exceed the quota, even if every
    /// request lands in the same window. Sleeping longer never helps: the
    /// window has already reset by then.
    pub fn upper_bound_sec(&self) -> f64 {
        self.duration_sec / self.requests_max as f64
    }
}

/// Delay to wait after each of `requests_total` sequential requests.
pub fn inter_request_delay(requests_total: usize, rate_limit: &RateLimit) -> Duration {
    inter_request_delay_with_rng(requests_total, rate_limit, &mut rand::thread_rng())
}

/// Same as [`inter_request_delay`] with an explicit jitter source.
pub fn inter_request_delay_with_rng<R: Rng + ?Sized>(
    requests_total: usize,
    rate_limit: &RateLimit,
    rng: &mut R,
) -> Duration {
    // Whole cents in [0.00, 1.00].
    let jitter_sec = rng.gen_range(0..=100u32) as f64 / 100.0;
    Duration::from_secs_f64(delay_sec(requests_total, rate_limit, jitter_sec))
}

fn delay_sec(requests_total: usize, rate_limit: &RateLimit, jitter_sec: f64) -> f64 {
    let upper_bound = rate_limit.upper_bound_sec();
    if requests_total <= rate_limit.requests_max as usize {
        return 0.0;
    }
    let base = (requests_total as f64 / rate_limit.requests_max as f64) * upper_bound;
    upper_bound.min(base + jitter_sec)
}
