//! Checkout form validation.
//!
//! Field-level validation of the contact details. Errors are returned to the
//! checkout screen and rendered inline next to each field; they never reach
//! the store, and submission is blocked while any remain.

use crate::types::UserDetails;
use regex::Regex;
use std::sync::LazyLock;

/// Deliberately simple email shape: something at something dot something
#[allow(clippy::expect_used)] // Literal pattern always compiles
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern should always compile"));

/// Per-field validation errors for the checkout form
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors {
    /// Error for the full name field, if any
    pub full_name: Option<&'static str>,
    /// Error for the email field, if any
    pub email: Option<&'static str>,
    /// Error for the phone field, if any
    pub phone: Option<&'static str>,
}

impl FormErrors {
    /// Whether the form passed validation
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

/// Validates the checkout form fields
///
/// Name and phone must be non-empty after trimming; the email must match the
/// simple `\S+@\S+.\S+` shape.
#[must_use]
pub fn validate_details(details: &UserDetails) -> FormErrors {
    let mut errors = FormErrors::default();

    if details.full_name.trim().is_empty() {
        errors.full_name = Some("Full name is required");
    }

    if details.email.trim().is_empty() {
        errors.email = Some("Email is required");
    } else if !EMAIL_PATTERN.is_match(details.email.trim()) {
        errors.email = Some("Email is invalid");
    }

    if details.phone.trim().is_empty() {
        errors.phone = Some("Phone number is required");
    }

    errors
}
