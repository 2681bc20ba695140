//! REST clients for the three backend services.
//!
//! # Architecture
//!
//! The backends are the system of record - the storefront keeps NO local
//! copy of users, orders, makis, or ingredients. Each client wraps one
//! service with a dedicated `reqwest::Client` and typed request/response
//! structs:
//!
//! - [`OrdersClient`] - buyer directory and order resource
//! - [`MenuClient`] - maki catalog (reads cached in-memory via `moka`)
//! - [`InventoryClient`] - ingredient stock records (admin surface only)
//!
//! # Example
//!
//! ```rust,ignore
//! use makiya_storefront::backend::{NewOrder, OrdersClient};
//!
//! let orders = OrdersClient::new("http://localhost:8000/api/orders");
//!
//! let buyers = orders.list_users().await?;
//! let order = orders.create_order(&new_order).await?;
//! ```

mod inventory;
mod menu;
mod orders;
pub mod types;

pub use inventory::InventoryClient;
pub use menu::MenuClient;
pub use orders::{OrderFilter, OrdersClient};
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling a backend service.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connection, timeout, malformed response).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Buyer creation rejected because the email is already registered.
    #[error("email already registered")]
    DuplicateEmail,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Failed to parse a response body.
    #[error("parse error: {0}")]
    Parse(String),
}

impl BackendError {
    /// Whether this error is the duplicate-email rejection from buyer creation.
    #[must_use]
    pub const fn is_duplicate_email(&self) -> bool {
        matches!(self, Self::DuplicateEmail)
    }
}

/// Build a [`BackendError`] from a non-success response, consuming its body.
pub(crate) async fn api_error(response: reqwest::Response) -> BackendError {
    let status = response.status();
    let message = response.text().await.unwrap_or_default();
    if status == reqwest::StatusCode::NOT_FOUND {
        return BackendError::NotFound(message);
    }
    BackendError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::NotFound("maki 7".to_string());
        assert_eq!(err.to_string(), "not found: maki 7");

        let err = BackendError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 500 - boom");
    }

    #[test]
    fn test_duplicate_email_predicate() {
        assert!(BackendError::DuplicateEmail.is_duplicate_email());
        assert!(
            !BackendError::NotFound(String::new()).is_duplicate_email()
        );
    }
}
