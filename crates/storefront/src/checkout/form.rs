//! Buyer checkout form.
//!
//! Transient state for a single checkout attempt - never persisted, reset
//! to defaults after a successful order placement.

use serde::{Deserialize, Serialize};

use makiya_core::{DocumentType, InvoiceDetail, InvoiceType};

/// Buyer identity and voucher options captured at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutForm {
    pub email: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub first_names: String,
    pub last_names: String,
    pub phone: String,
    pub recipient_name: String,
    pub invoice_type: InvoiceType,
    pub invoice_detail: InvoiceDetail,
    pub accept_terms: bool,
}

impl CheckoutForm {
    /// Buyer display name sent to the backend: first and last names joined.
    #[must_use]
    pub fn buyer_name(&self) -> String {
        format!("{} {}", self.first_names.trim(), self.last_names.trim())
    }

    /// Reset the form to its empty state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Strip every non-digit character (thousands separators, spaces, dashes).
#[must_use]
pub fn strip_separators(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
