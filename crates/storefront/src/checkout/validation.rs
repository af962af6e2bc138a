//! Field-level form validation.
//!
//! Validators collect every failing field into a [`FieldErrors`] map instead
//! of stopping at the first problem, so a form can show all messages at once.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*[0-9]$").expect("Invalid regex"));
static POSTAL_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,8}[A-Za-z0-9]$").expect("Invalid regex")
});
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9 ]+$").expect("Invalid regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{2})$").expect("Invalid regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;
const CARD_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Minimum password length for registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validation failures keyed by form field name.
///
/// Serializes as the bare field-to-message map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message per field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_owned())
            .or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors if any field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Require a non-blank value.
pub fn require(errors: &mut FieldErrors, field: &str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
        false
    } else {
        true
    }
}

pub fn email(errors: &mut FieldErrors, field: &str, value: &str) {
    if require(errors, field, value, "Email") && !EMAIL_RE.is_match(value.trim()) {
        errors.add(field, "Enter a valid email address");
    }
}

/// 10-15 digits, optional leading `+`, spaces and dashes allowed between digits.
pub fn phone(errors: &mut FieldErrors, field: &str, value: &str) {
    if !require(errors, field, value, "Phone number") {
        return;
    }
    let value = value.trim();
    if !PHONE_RE.is_match(value) || !PHONE_DIGITS.contains(&digit_count(value)) {
        errors.add(field, "Enter a valid phone number");
    }
}

pub fn postal_code(errors: &mut FieldErrors, field: &str, value: &str) {
    if require(errors, field, value, "Postal code") && !POSTAL_CODE_RE.is_match(value.trim()) {
        errors.add(field, "Enter a valid postal code");
    }
}

/// Card number: 13-19 digits (spaces allowed) passing the Luhn check.
pub fn card_number(errors: &mut FieldErrors, field: &str, value: &str) {
    if !require(errors, field, value, "Card number") {
        return;
    }
    let value = value.trim();
    let valid = CARD_NUMBER_RE.is_match(value)
        && CARD_DIGITS.contains(&digit_count(value))
        && luhn_valid(value);
    if !valid {
        errors.add(field, "Enter a valid card number");
    }
}

/// `MM/YY`, valid through the end of the stated month.
pub fn card_expiry(errors: &mut FieldErrors, field: &str, value: &str, now: DateTime<Utc>) {
    if !require(errors, field, value, "Expiry date") {
        return;
    }
    let Some(captures) = EXPIRY_RE.captures(value.trim()) else {
        errors.add(field, "Use the MM/YY format");
        return;
    };

    let month: u32 = captures[1].parse().unwrap_or(0);
    let year: i32 = 2000 + captures[2].parse::<i32>().unwrap_or(0);
    if (year, month) < (now.year(), now.month()) {
        errors.add(field, "Card has expired");
    }
}

pub fn cvv(errors: &mut FieldErrors, field: &str, value: &str) {
    if require(errors, field, value, "CVV") && !CVV_RE.is_match(value.trim()) {
        errors.add(field, "CVV must be 3 or 4 digits");
    }
}

pub fn password(errors: &mut FieldErrors, field: &str, value: &str) {
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            field,
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// Luhn checksum over the digits of `value`, ignoring anything else.
fn luhn_valid(value: &str) -> bool {
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.is_empty() {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn check(f: impl FnOnce(&mut FieldErrors)) -> FieldErrors {
        let mut errors = FieldErrors::new();
        f(&mut errors);
        errors
    }

    #[test]
    fn test_email() {
        assert!(check(|e| email(e, "email", "ada@example.com")).is_empty());
        assert_eq!(
            check(|e| email(e, "email", "")).get("email"),
            Some("Email is required")
        );
        assert!(check(|e| email(e, "email", "ada@example")).contains("email"));
        assert!(check(|e| email(e, "email", "a da@example.com")).contains("email"));
    }

    #[test]
    fn test_phone() {
        assert!(check(|e| phone(e, "phone", "+1 415-555-0100")).is_empty());
        assert!(check(|e| phone(e, "phone", "9876543210")).is_empty());
        assert!(check(|e| phone(e, "phone", "12345")).contains("phone"));
        assert!(check(|e| phone(e, "phone", "555-CALL-NOW")).contains("phone"));
    }

    #[test]
    fn test_postal_code() {
        assert!(check(|e| postal_code(e, "zip", "94107")).is_empty());
        assert!(check(|e| postal_code(e, "zip", "SW1A 1AA")).is_empty());
        assert!(check(|e| postal_code(e, "zip", "1")).contains("zip"));
        assert!(check(|e| postal_code(e, "zip", "#123")).contains("zip"));
    }

    #[test]
    fn test_card_number_luhn() {
        assert!(check(|e| card_number(e, "card", "4111 1111 1111 1111")).is_empty());
        assert!(check(|e| card_number(e, "card", "4111 1111 1111 1112")).contains("card"));
        assert!(check(|e| card_number(e, "card", "4111")).contains("card"));
    }

    #[test]
    fn test_card_expiry() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap();
        assert!(check(|e| card_expiry(e, "exp", "06/25", now)).is_empty());
        assert!(check(|e| card_expiry(e, "exp", "01/30", now)).is_empty());
        assert_eq!(
            check(|e| card_expiry(e, "exp", "05/25", now)).get("exp"),
            Some("Card has expired")
        );
        assert_eq!(
            check(|e| card_expiry(e, "exp", "13/25", now)).get("exp"),
            Some("Use the MM/YY format")
        );
    }

    #[test]
    fn test_cvv_and_password() {
        assert!(check(|e| cvv(e, "cvv", "123")).is_empty());
        assert!(check(|e| cvv(e, "cvv", "12a")).contains("cvv"));
        assert!(check(|e| password(e, "password", "short")).contains("password"));
        assert!(check(|e| password(e, "password", "long enough")).is_empty());
    }

    #[test]
    fn test_first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.add("email", "first");
        errors.add("email", "second");
        assert_eq!(errors.get("email"), Some("first"));
        assert_eq!(errors.len(), 1);
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_serializes_as_map() {
        let mut errors = FieldErrors::new();
        errors.add("city", "City is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["city"], "City is required");
    }
}
