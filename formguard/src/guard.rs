//! The submission guard: rate check, sanitize, validate, in that order.

use std::time::Duration;

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::rate_limit::RateLimiter;
use crate::sanitize::sanitize;
use crate::submission::{ContactSubmission, RawSubmission};
use crate::validate::validate;

/// Rate-limit identifier used when the submission carries no usable email.
pub const ANONYMOUS_IDENTIFIER: &str = "anonymous";

/// Gates contact-form submissions before they reach a delivery mechanism.
///
/// Each guard owns its own rate-limit state; construct one per process (or
/// one per test) rather than sharing an ambient singleton. Delivery of an
/// accepted [`ContactSubmission`] is the caller's concern.
#[derive(Debug)]
pub struct ContactGuard {
    limiter: RateLimiter,
}

impl ContactGuard {
    /// Create a guard with the given rate-limiter configuration.
    #[must_use]
    pub fn new(config: &GuardConfig) -> Self {
        Self {
            limiter: RateLimiter::new(config.max_attempts, config.window),
        }
    }

    /// Check and record one attempt for `identifier` without validating
    /// anything. [`submit`](Self::submit) calls this internally.
    #[must_use = "an ignored refusal defeats the rate limit"]
    pub fn check_rate_limit(&self, identifier: &str) -> bool {
        self.limiter.check(identifier)
    }

    /// Time until `identifier` may submit again; zero while under the limit.
    #[must_use]
    pub fn remaining_cooldown(&self, identifier: &str) -> Duration {
        self.limiter.remaining_cooldown(identifier)
    }

    /// Run a raw submission through the guard.
    ///
    /// The attempt is keyed by the sanitized email when present, otherwise
    /// by [`ANONYMOUS_IDENTIFIER`]. The rate check runs first, so invalid
    /// submissions still consume an attempt.
    ///
    /// # Errors
    ///
    /// - [`GuardError::RateLimited`] when the identifier is over the limit;
    ///   carries the time to wait before retrying.
    /// - [`GuardError::Invalid`] when one or more fields fail validation;
    ///   carries a message per failing field.
    pub fn submit(&self, raw: &RawSubmission) -> Result<ContactSubmission, GuardError> {
        let email = sanitize(&raw.email);
        let identifier = if email.is_empty() {
            ANONYMOUS_IDENTIFIER
        } else {
            email.as_str()
        };

        if !self.limiter.check(identifier) {
            let retry_after = self.limiter.remaining_cooldown(identifier);
            tracing::warn!(
                identifier,
                retry_after_ms = u64::try_from(retry_after.as_millis()).unwrap_or(u64::MAX),
                "submission rate limited"
            );
            return Err(GuardError::RateLimited { retry_after });
        }

        match validate(raw) {
            Ok(submission) => {
                tracing::debug!(identifier, "submission accepted");
                Ok(submission)
            }
            Err(field_errors) => {
                tracing::debug!(
                    identifier,
                    fields = field_errors.len(),
                    "submission failed validation"
                );
                Err(GuardError::Invalid { field_errors })
            }
        }
    }
}

impl Default for ContactGuard {
    fn default() -> Self {
        Self::new(&GuardConfig::default())
    }
}
