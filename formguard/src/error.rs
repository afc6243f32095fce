//! Error types for the submission guard.
//!
//! Both variants are normal, user-recoverable outcomes. Nothing in this
//! crate panics for an expected condition; callers always get a typed result.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A submission field, used to key per-field validation errors.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    /// Submitter's name.
    Name,
    /// Submitter's email address.
    Email,
    /// Company name.
    Company,
    /// Message body.
    Message,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Message => "message",
        };
        f.write_str(name)
    }
}

/// Per-field validation failures, one human-readable message per failing field.
///
/// A `BTreeMap` keeps reporting order deterministic (form order: name, email,
/// company, message).
pub type FieldErrors = BTreeMap<Field, String>;

/// Why a submission was refused by [`ContactGuard::submit`](crate::guard::ContactGuard::submit).
///
/// Deliberately exhaustive: the two variants are the complete failure
/// taxonomy, and callers are expected to match on both.
#[derive(Debug, Clone, Error, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GuardError {
    /// The identifier submitted too frequently; recoverable by waiting.
    #[error("too many attempts; retry after {}ms", retry_after.as_millis())]
    RateLimited {
        /// Time until the oldest counted attempt exits the window.
        #[serde(serialize_with = "serialize_millis")]
        retry_after: Duration,
    },

    /// One or more fields failed validation; recoverable by correcting them.
    #[error("{} invalid field(s)", field_errors.len())]
    Invalid {
        /// Message per failing field. Every failing field is reported, not
        /// just the first.
        field_errors: FieldErrors,
    },
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_u128(duration.as_millis())
}
