//! Status and option enums shared across the storefront and CLI.
//!
//! These map to the wire vocabulary of the orders backend (statuses and
//! payment methods are lowercase strings) and to the checkout form's
//! fixed option sets.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Maps to the orders backend status values. New orders are always created
/// as `pending`; the remaining states are driven by administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Preparing,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "preparing" => Ok(Self::Preparing),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment method tag sent with each created order.
///
/// Checkout does not integrate a payment gateway; the tag is derived from
/// the buyer's invoice choice and recorded on the order as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Transfer => "transfer",
        };
        write!(f, "{s}")
    }
}

/// Identity document type on the checkout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// National identity document - exactly 8 digits.
    #[default]
    NationalId,
    /// Foreigner card - free-form number.
    ForeignId,
}

/// Payment voucher type chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceType {
    #[default]
    Receipt,
    Invoice,
}

impl InvoiceType {
    /// Payment method tag derived from the voucher choice.
    ///
    /// Receipts are treated as cash sales, invoices as card sales.
    #[must_use]
    pub const fn payment_method(self) -> PaymentMethod {
        match self {
            Self::Receipt => PaymentMethod::Cash,
            Self::Invoice => PaymentMethod::Card,
        }
    }
}

/// Level of detail for the payment voucher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceDetail {
    #[default]
    Simple,
    Detailed,
}

/// Allergy declaration attached to a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AllergyFlag {
    Yes,
    #[default]
    No,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_order_status_from_str() {
        assert_eq!("preparing".parse::<OrderStatus>().unwrap(), OrderStatus::Preparing);
        assert!("unknown".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_payment_method_derivation() {
        assert_eq!(InvoiceType::Receipt.payment_method(), PaymentMethod::Cash);
        assert_eq!(InvoiceType::Invoice.payment_method(), PaymentMethod::Card);
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Cash).unwrap(),
            "\"cash\""
        );
        assert_eq!(PaymentMethod::Card.to_string(), "card");
    }

    #[test]
    fn test_defaults_match_empty_form() {
        assert_eq!(DocumentType::default(), DocumentType::NationalId);
        assert_eq!(InvoiceType::default(), InvoiceType::Receipt);
        assert_eq!(InvoiceDetail::default(), InvoiceDetail::Simple);
        assert_eq!(AllergyFlag::default(), AllergyFlag::No);
    }
}
