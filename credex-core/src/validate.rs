//! Explicit field validation for operation inputs.
//!
//! Each request struct exposes a `validate()` method built from the checks
//! in this module, returning a [`ValidationReport`] of every failed
//! constraint rather than bailing on the first one.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Inclusive lower bound on plaintext password length, in bytes.
pub const PASSWORD_MIN_LENGTH: u16 = 8;
/// Inclusive upper bound on plaintext password length, in bytes.
pub const PASSWORD_MAX_LENGTH: u16 = 30;

// RFC-approximate: dot-atom local part, at least one dot in the domain.
// "user@host" without a TLD label is rejected.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

/// A single failed constraint on a named input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Name of the offending field, as spelled on the request struct.
    pub field: &'static str,
    /// The constraint that failed.
    pub rule: ViolationRule,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.rule)
    }
}

/// The constraint behind a [`FieldViolation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ViolationRule {
    /// Field was empty.
    Required,
    /// Field is not a syntactically plausible email address.
    Email,
    /// Field is shorter than the given byte length.
    MinLength(u16),
    /// Field is longer than the given byte length.
    MaxLength(u16),
    /// Field must equal the named sibling field.
    EqualsField(&'static str),
    /// Field must differ from the named sibling field.
    NotEqualsField(&'static str),
    /// Numeric field must be a positive identifier.
    Positive,
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "must not be empty"),
            Self::Email => write!(f, "must be a valid email address"),
            Self::MinLength(len) => {
                write!(f, "must be at least {} characters", len)
            }
            Self::MaxLength(len) => {
                write!(f, "must be at most {} characters", len)
            }
            Self::EqualsField(other) => write!(f, "must match {}", other),
            Self::NotEqualsField(other) => write!(f, "must differ from {}", other),
            Self::Positive => write!(f, "must be a positive id"),
        }
    }
}

/// Outcome of validating one request struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Every failed constraint, in field declaration order.
    pub violations: Vec<FieldViolation>,
}

impl ValidationReport {
    /// True when no constraint failed.
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }

    /// True when the named field has at least one violation.
    pub fn has_violation_on(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    pub(crate) fn push(&mut self, field: &'static str, rule: ViolationRule) {
        self.violations.push(FieldViolation { field, rule });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}

/// Required + email syntax. An empty value reports only `Required`.
pub(crate) fn check_email(report: &mut ValidationReport, field: &'static str, value: &str) {
    if value.is_empty() {
        report.push(field, ViolationRule::Required);
        return;
    }
    if !EMAIL_PATTERN.is_match(value) {
        report.push(field, ViolationRule::Email);
    }
}

/// Required + password length bounds. Lengths are byte lengths.
pub(crate) fn check_password(report: &mut ValidationReport, field: &'static str, value: &str) {
    if value.is_empty() {
        report.push(field, ViolationRule::Required);
        return;
    }
    if value.len() < PASSWORD_MIN_LENGTH as usize {
        report.push(field, ViolationRule::MinLength(PASSWORD_MIN_LENGTH));
    }
    if value.len() > PASSWORD_MAX_LENGTH as usize {
        report.push(field, ViolationRule::MaxLength(PASSWORD_MAX_LENGTH));
    }
}

/// Required + exact equality with a sibling field (confirmation inputs).
pub(crate) fn check_equals(
    report: &mut ValidationReport,
    field: &'static str,
    other_field: &'static str,
    value: &str,
    other: &str,
) {
    if value.is_empty() {
        report.push(field, ViolationRule::Required);
        return;
    }
    if value != other {
        report.push(field, ViolationRule::EqualsField(other_field));
    }
}

/// Inequality with a sibling field (new value must actually change).
pub(crate) fn check_not_equals(
    report: &mut ValidationReport,
    field: &'static str,
    other_field: &'static str,
    value: &str,
    other: &str,
) {
    if !value.is_empty() && value == other {
        report.push(field, ViolationRule::NotEqualsField(other_field));
    }
}

/// Store-assigned ids are positive; zero and negatives are never valid.
pub(crate) fn check_positive_id(report: &mut ValidationReport, field: &'static str, id: i64) {
    if id <= 0 {
        report.push(field, ViolationRule::Positive);
    }
}
