//! Sliding-window rate limiting keyed by submitter identifier.
//!
//! Each identifier owns an ordered list of attempt timestamps. A check
//! prunes timestamps that have left the window, then either records the
//! attempt (under the limit) or refuses it without recording (at the
//! limit). Refused attempts never extend the cooldown.
//!
//! State lives behind a `Mutex` so one limiter can be shared by a
//! multi-threaded host; the checks themselves are synchronous and never
//! block on anything but the lock.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// When the identifier map reaches this size, identifiers whose attempts
/// have all left the window are swept out. Bounds total memory in
/// long-running hosts without a background task.
const SWEEP_THRESHOLD: usize = 1024;

/// A sliding-window attempt limiter.
///
/// Independent instances share nothing; construct one per guard so tests
/// never interfere with each other.
#[derive(Debug)]
pub struct RateLimiter {
    max_attempts: usize,
    window: Duration,
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RateLimiter {
    /// Create a limiter allowing `max_attempts` per identifier per `window`.
    #[must_use]
    pub fn new(max_attempts: usize, window: Duration) -> Self {
        Self {
            max_attempts,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check and record one attempt for `identifier`.
    ///
    /// Returns `true` and records the attempt if the identifier has made
    /// fewer than `max_attempts` attempts within the window; returns
    /// `false` without recording otherwise. Never errors.
    #[must_use = "an ignored refusal defeats the rate limit"]
    pub fn check(&self, identifier: &str) -> bool {
        self.check_at(identifier, Instant::now())
    }

    /// Time until `identifier` is allowed again.
    ///
    /// Zero while the identifier is under the limit; otherwise the time
    /// until the oldest counted attempt exits the window.
    #[must_use]
    pub fn remaining_cooldown(&self, identifier: &str) -> Duration {
        self.remaining_at(identifier, Instant::now())
    }

    fn check_at(&self, identifier: &str, now: Instant) -> bool {
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Sweep only when a new identifier would grow an already-crowded map;
        // checks for known identifiers stay O(1) in the map size.
        if attempts.len() >= SWEEP_THRESHOLD && !attempts.contains_key(identifier) {
            let window = self.window;
            attempts.retain(|_, record| {
                record
                    .iter()
                    .any(|&at| now.saturating_duration_since(at) < window)
            });
        }

        let record = attempts.entry(identifier.to_owned()).or_default();
        record.retain(|&at| now.saturating_duration_since(at) < self.window);

        if record.len() >= self.max_attempts {
            return false;
        }
        record.push(now);
        true
    }

    fn remaining_at(&self, identifier: &str, now: Instant) -> Duration {
        let mut attempts = self
            .attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(record) = attempts.get_mut(identifier) else {
            return Duration::ZERO;
        };
        record.retain(|&at| now.saturating_duration_since(at) < self.window);

        if record.len() < self.max_attempts {
            return Duration::ZERO;
        }
        let Some(&oldest) = record.first() else {
            return Duration::ZERO;
        };
        self.window
            .saturating_sub(now.saturating_duration_since(oldest))
    }

    #[cfg(test)]
    fn tracked_identifiers(&self) -> usize {
        self.attempts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(60);
    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_allows_up_to_max_then_refuses() {
        let limiter = RateLimiter::new(3, WINDOW);
        let base = Instant::now();
        for i in 0..3 {
            assert!(limiter.check_at("a@b.co", base + MS * i), "attempt {i}");
        }
        assert!(!limiter.check_at("a@b.co", base + MS * 3));
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(3, WINDOW);
        let base = Instant::now();
        for i in 0..3 {
            assert!(limiter.check_at("a@b.co", base + MS * i));
        }
        assert!(!limiter.check_at("a@b.co", base + MS * 3));
        // The first attempt leaves the window exactly WINDOW after it was made.
        assert!(limiter.check_at("a@b.co", base + WINDOW));
    }

    #[test]
    fn test_identifiers_are_independent() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();
        assert!(limiter.check_at("a@b.co", base));
        assert!(limiter.check_at("c@d.co", base));
        assert!(!limiter.check_at("a@b.co", base + MS));
    }

    #[test]
    fn test_refused_attempts_are_not_recorded() {
        let limiter = RateLimiter::new(1, WINDOW);
        let base = Instant::now();
        assert!(limiter.check_at("a@b.co", base));
        // Hammering while refused must not push the cooldown out.
        for i in 1..100 {
            assert!(!limiter.check_at("a@b.co", base + MS * i));
        }
        assert!(limiter.check_at("a@b.co", base + WINDOW));
    }

    #[test]
    fn test_cooldown_zero_while_allowed() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();
        assert_eq!(limiter.remaining_at("a@b.co", base), Duration::ZERO);
        assert!(limiter.check_at("a@b.co", base));
        assert_eq!(limiter.remaining_at("a@b.co", base), Duration::ZERO);
    }

    #[test]
    fn test_cooldown_counts_down_from_oldest_attempt() {
        let limiter = RateLimiter::new(2, WINDOW);
        let base = Instant::now();
        assert!(limiter.check_at("a@b.co", base));
        assert!(limiter.check_at("a@b.co", base + MS * 10));

        assert_eq!(limiter.remaining_at("a@b.co", base + MS * 10), WINDOW - MS * 10);
        assert_eq!(
            limiter.remaining_at("a@b.co", base + MS * 500),
            WINDOW - MS * 500
        );
        assert_eq!(limiter.remaining_at("a@b.co", base + WINDOW), Duration::ZERO);
    }

    #[test]
    fn test_zero_max_attempts_refuses_everything() {
        let limiter = RateLimiter::new(0, WINDOW);
        let base = Instant::now();
        assert!(!limiter.check_at("a@b.co", base));
    }

    #[test]
    fn test_stale_identifiers_are_swept() {
        let limiter = RateLimiter::new(3, WINDOW);
        let base = Instant::now();
        for i in 0..SWEEP_THRESHOLD {
            assert!(limiter.check_at(&format!("user{i}@example.com"), base));
        }
        assert_eq!(limiter.tracked_identifiers(), SWEEP_THRESHOLD);

        // A fresh identifier arriving after the window evicts all stale records.
        assert!(limiter.check_at("late@example.com", base + WINDOW));
        assert_eq!(limiter.tracked_identifiers(), 1);
    }
}
