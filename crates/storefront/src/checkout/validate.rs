//! Checkout form validation.
//!
//! Pure and synchronous - no network access. Validation runs in full on
//! submit; individual field errors are cleared one at a time as the
//! shopper edits that field (see [`FieldErrors::clear`]).

use std::collections::BTreeMap;

use serde::Serialize;

use makiya_core::{DocumentType, Email};

use super::form::{CheckoutForm, strip_separators};

/// Form field names, as used in error maps and client payloads.
pub mod fields {
    pub const EMAIL: &str = "email";
    pub const DOCUMENT_NUMBER: &str = "document_number";
    pub const FIRST_NAMES: &str = "first_names";
    pub const LAST_NAMES: &str = "last_names";
    pub const PHONE: &str = "phone";
    pub const RECIPIENT_NAME: &str = "recipient_name";
}

/// Required digit count for a national ID document number.
const NATIONAL_ID_DIGITS: usize = 8;

/// Required digit count for a phone number.
const PHONE_DIGITS: usize = 9;

/// Minimum trimmed length for name fields.
const MIN_NAME_LENGTH: usize = 2;

/// Per-field validation errors. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Whether no field has an error.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The error message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Record an error for `field`.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clear the error for a single field - used as the shopper edits that
    /// field, without re-validating the rest of the form.
    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Validate the buyer form. Returns an empty [`FieldErrors`] when valid.
#[must_use]
pub fn validate(form: &CheckoutForm) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if form.email.is_empty() {
        errors.insert(fields::EMAIL, "Email is required");
    } else if Email::parse(form.email.trim()).is_err() {
        errors.insert(fields::EMAIL, "Email is not valid");
    }

    if form.document_number.is_empty() {
        errors.insert(fields::DOCUMENT_NUMBER, "Document number is required");
    } else if form.document_type == DocumentType::NationalId
        && strip_separators(&form.document_number).len() != NATIONAL_ID_DIGITS
    {
        errors.insert(
            fields::DOCUMENT_NUMBER,
            format!("National ID must have {NATIONAL_ID_DIGITS} digits"),
        );
    }

    validate_name(&mut errors, fields::FIRST_NAMES, &form.first_names, "First names");
    validate_name(&mut errors, fields::LAST_NAMES, &form.last_names, "Last names");

    if form.phone.is_empty() {
        errors.insert(fields::PHONE, "Phone is required");
    } else if strip_separators(&form.phone).len() != PHONE_DIGITS {
        errors.insert(
            fields::PHONE,
            format!("Phone must have {PHONE_DIGITS} digits"),
        );
    }

    validate_name(
        &mut errors,
        fields::RECIPIENT_NAME,
        &form.recipient_name,
        "Recipient name",
    );

    errors
}

/// Shared rule for name-like fields: required, trimmed length >= 2.
fn validate_name(errors: &mut FieldErrors, field: &'static str, value: &str, label: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(field, format!("{label} is required"));
    } else if trimmed.len() < MIN_NAME_LENGTH {
        errors.insert(
            field,
            format!("{label} must have at least {MIN_NAME_LENGTH} characters"),
        );
    }
}
