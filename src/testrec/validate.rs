//! Field validators.
//!
//! All checks run on the trimmed input. They are pure and never prompt: the
//! caller decides whether to ask again or give up.

use crate::error::{Result, TestrecError};
use crate::model::{Field, TestResult};

pub const MIN_FIELD_LEN: usize = 3;
pub const MAX_FIELD_LEN: usize = 99;

const NAME_PUNCTUATION: &[char] = &['(', ')', '[', ']', '-', '_', '.', ' '];

fn within_length(trimmed: &str) -> bool {
    let len = trimmed.chars().count();
    (MIN_FIELD_LEN..=MAX_FIELD_LEN).contains(&len)
}

/// System names allow ASCII alphanumerics plus `()[]-_.` and spaces.
pub fn validate_name(raw: &str) -> bool {
    let trimmed = raw.trim();
    within_length(trimmed)
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || NAME_PUNCTUATION.contains(&c))
}

/// Test types are strictly ASCII alphanumeric.
pub fn validate_type(raw: &str) -> bool {
    let trimmed = raw.trim();
    within_length(trimmed) && trimmed.chars().all(|c| c.is_ascii_alphanumeric())
}

pub fn validate_id(raw: &str) -> bool {
    parse_id(raw).is_some()
}

/// Parses a strictly positive base-10 ID. Trailing garbage is rejected.
pub fn parse_id(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse::<u64>().ok().filter(|id| *id > 0)
}

/// Trimmed system name, or a `Validation` error.
pub fn check_name(raw: &str) -> Result<String> {
    if validate_name(raw) {
        return Ok(raw.trim().to_string());
    }
    Err(TestrecError::validation(
        Field::SystemName.label(),
        format!(
            "{:?} must be {}-{} characters of letters, digits, spaces or ()[]-_.",
            raw.trim(),
            MIN_FIELD_LEN,
            MAX_FIELD_LEN
        ),
    ))
}

/// Trimmed test type, or a `Validation` error.
pub fn check_type(raw: &str) -> Result<String> {
    if validate_type(raw) {
        return Ok(raw.trim().to_string());
    }
    Err(TestrecError::validation(
        Field::TestType.label(),
        format!(
            "{:?} must be {}-{} letters or digits",
            raw.trim(),
            MIN_FIELD_LEN,
            MAX_FIELD_LEN
        ),
    ))
}

pub fn check_result(raw: &str) -> Result<TestResult> {
    raw.parse::<TestResult>()
        .map_err(|e| TestrecError::validation(Field::Result.label(), e.to_string()))
}

pub fn check_id(raw: &str) -> Result<u64> {
    parse_id(raw).ok_or_else(|| {
        TestrecError::validation("test ID", format!("{:?} is not a positive integer", raw.trim()))
    })
}
