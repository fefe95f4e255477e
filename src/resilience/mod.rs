//! Rate-limit primitives for talking to a quota-bound remote API.
//!
//! The migration knows its whole workload up front and sends it strictly one
//! request at a time, so instead of a token bucket it derives a single fixed
//! pause to insert after every request.
//!
//! ```rust
//! use homeowner_migration::resilience::rate_limit::{inter_request_delay, RateLimit};
//!
//! let limit = RateLimit::new(20, 10.0)?;
//! let delay = inter_request_delay(40, &limit);
//! assert!(delay.as_secs_f64() <= limit.upper_bound_sec());
//! # Ok::<(), homeowner_migration::resilience::rate_limit::RateLimitError>(())
//! ```

pub mod rate_limit;

pub use rate_limit::{
    inter_request_delay, inter_request_delay_with_rng, RateLimit, RateLimitError,
    CLERK_USERS_RATE_LIMIT,
};
