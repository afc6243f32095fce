//! Field validation for contact submissions.
//!
//! Every string field is sanitized first, then checked in form order
//! (name, email, company, message). All failing fields are collected and
//! reported together; validation never stops at the first failure.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Field, FieldErrors};
use crate::sanitize::sanitize;
use crate::submission::{ContactSubmission, RawSubmission};

/// Minimum name length in characters.
pub const NAME_MIN_CHARS: usize = 2;
/// Maximum name length in characters.
pub const NAME_MAX_CHARS: usize = 100;
/// Maximum email length in characters.
pub const EMAIL_MAX_CHARS: usize = 100;
/// Maximum company length in characters.
pub const COMPANY_MAX_CHARS: usize = 100;
/// Maximum message length in characters.
pub const MESSAGE_MAX_CHARS: usize = 1000;

/// Unicode letters and whitespace only — no digits, no symbols.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[\p{L}\s]+$") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid name pattern: {err}"),
});

/// Pragmatic email shape check: one `@`, a dot in the domain, no whitespace.
/// Full RFC 5322 parsing is deliberately out of scope.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid email pattern: {err}"),
    });

/// Sanitize and validate a raw submission.
///
/// On success the returned [`ContactSubmission`] carries the sanitized
/// field values; optional fields that sanitize to an empty string become
/// `None`.
///
/// # Errors
///
/// Returns one message per failing field, covering every failing field at
/// once (a submission with a bad name AND a bad email reports both).
pub fn validate(raw: &RawSubmission) -> Result<ContactSubmission, FieldErrors> {
    let name = sanitize(&raw.name);
    let email = sanitize(&raw.email);
    let company = optional(raw.company.as_deref());
    let message = optional(raw.message.as_deref());

    let mut errors = FieldErrors::new();

    if name.is_empty() {
        errors.insert(Field::Name, "Name is required".to_owned());
    } else if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name.chars().count()) {
        errors.insert(
            Field::Name,
            format!("Name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"),
        );
    } else if !NAME_PATTERN.is_match(&name) {
        errors.insert(
            Field::Name,
            "Name may only contain letters and spaces".to_owned(),
        );
    }

    if email.is_empty() {
        errors.insert(Field::Email, "Email is required".to_owned());
    } else if !EMAIL_PATTERN.is_match(&email) {
        errors.insert(Field::Email, "Email address is invalid".to_owned());
    } else if email.chars().count() > EMAIL_MAX_CHARS {
        errors.insert(
            Field::Email,
            format!("Email must be at most {EMAIL_MAX_CHARS} characters"),
        );
    }

    if let Some(company) = &company
        && company.chars().count() > COMPANY_MAX_CHARS
    {
        errors.insert(
            Field::Company,
            format!("Company must be at most {COMPANY_MAX_CHARS} characters"),
        );
    }

    if let Some(message) = &message
        && message.chars().count() > MESSAGE_MAX_CHARS
    {
        errors.insert(
            Field::Message,
            format!("Message must be at most {MESSAGE_MAX_CHARS} characters"),
        );
    }

    if errors.is_empty() {
        Ok(ContactSubmission {
            name,
            email,
            company,
            message,
        })
    } else {
        Err(errors)
    }
}

/// Sanitize an optional field; an absent or emptied-out value becomes `None`.
fn optional(raw: Option<&str>) -> Option<String> {
    let clean = sanitize(raw?);
    if clean.is_empty() { None } else { Some(clean) }
}
