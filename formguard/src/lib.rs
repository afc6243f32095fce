//! # formguard
//!
//! Contact-form submission guard: validation, sanitization and rate limiting.
//!
//! A submission passes three sequential checks — rate limit, sanitize,
//! validate — before the caller hands it to whatever delivers it (an email
//! API, a ticketing endpoint). The guard itself performs no I/O and never
//! retries; every refusal is a typed, recoverable result.
//!
//! ## Quick Start
//!
//! ```rust
//! use formguard::{ContactGuard, GuardConfig, GuardError, RawSubmission};
//!
//! let guard = ContactGuard::new(&GuardConfig::default());
//!
//! let raw = RawSubmission {
//!     name: "Maria Silva".to_owned(),
//!     email: "maria@example.com".to_owned(),
//!     company: None,
//!     message: Some("<script>alert(1)</script>Hello".to_owned()),
//! };
//!
//! match guard.submit(&raw) {
//!     Ok(accepted) => assert_eq!(accepted.message.as_deref(), Some("Hello")),
//!     Err(GuardError::RateLimited { retry_after }) => {
//!         println!("try again in {}ms", retry_after.as_millis());
//!     }
//!     Err(GuardError::Invalid { field_errors }) => {
//!         for (field, message) in &field_errors {
//!             println!("{field}: {message}");
//!         }
//!     }
//! }
//! ```

mod config;
mod error;
mod guard;
mod rate_limit;
mod sanitize;
mod submission;
mod validate;

pub use config::GuardConfig;
pub use error::{Field, FieldErrors, GuardError};
pub use guard::{ANONYMOUS_IDENTIFIER, ContactGuard};
pub use rate_limit::RateLimiter;
pub use sanitize::sanitize;
pub use submission::{ContactSubmission, RawSubmission};
pub use validate::{
    COMPANY_MAX_CHARS, EMAIL_MAX_CHARS, MESSAGE_MAX_CHARS, NAME_MAX_CHARS, NAME_MIN_CHARS, validate,
};
