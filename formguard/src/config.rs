//! Guard configuration.
//!
//! Only the rate limiter is tunable; field limits are part of the
//! validation contract and deliberately not configurable.

use std::time::Duration;

/// Rate-limiter configuration for a [`ContactGuard`](crate::guard::ContactGuard).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct GuardConfig {
    /// Maximum accepted attempts per identifier within one window (default: 3).
    pub max_attempts: usize,
    /// Length of the sliding window (default: 60 seconds).
    pub window: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            window: Duration::from_secs(60),
        }
    }
}
