//! Submission types: the raw form payload and its validated counterpart.

use serde::{Deserialize, Serialize};

/// A contact-form submission exactly as received from the caller.
///
/// Nothing about this type is trusted: fields may be missing, over-long,
/// or carry markup. It only becomes a [`ContactSubmission`] by passing
/// through [`validate`](crate::validate::validate).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSubmission {
    /// Submitter's name. Required; missing is treated as empty and rejected.
    #[serde(default)]
    pub name: String,
    /// Submitter's email address. Required; missing is treated as empty and rejected.
    #[serde(default)]
    pub email: String,
    /// Company name, if the submitter provided one.
    #[serde(default)]
    pub company: Option<String>,
    /// Free-form message body.
    #[serde(default)]
    pub message: Option<String>,
}

/// A sanitized, validated contact submission, ready for delivery.
///
/// Invariants upheld by construction (see [`validate`](crate::validate::validate)):
/// no field contains `<` or `>`, `name` and `email` are non-empty, and every
/// field is within its documented length bound.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ContactSubmission {
    /// Validated name: 2-100 characters, Unicode letters and whitespace only.
    pub name: String,
    /// Validated email address, at most 100 characters.
    pub email: String,
    /// Validated company name, at most 100 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// Validated message body, at most 1000 characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
