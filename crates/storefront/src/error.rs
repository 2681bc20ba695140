//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Raw backend error payloads are never forwarded to clients.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::backend::BackendError;
use crate::cart::CartStoreError;
use crate::checkout::CheckoutError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend service operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Checkout attempt aborted.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Cart snapshot persistence failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartStoreError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether this error should be captured to Sentry.
    ///
    /// Validation and precondition failures are expected traffic; backend
    /// and persistence failures are not.
    fn is_server_error(&self) -> bool {
        match self {
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) | Self::BadRequest(_) => {
                false
            }
            Self::Checkout(err) => matches!(
                err,
                CheckoutError::Backend(_) | CheckoutError::Store(_)
            ),
            Self::Backend(_) | Self::Cart(_) | Self::Internal(_) => true,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Checkout(err) => match err {
                CheckoutError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CheckoutError::EmptyCart | CheckoutError::TermsNotAccepted => StatusCode::CONFLICT,
                CheckoutError::Backend(_) => StatusCode::BAD_GATEWAY,
                CheckoutError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Cart(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose backend payloads or internal details to clients
        let body = match &self {
            Self::Checkout(CheckoutError::Invalid(fields)) => json!({
                "error": "Please correct the errors in the form",
                "fields": fields,
            }),
            Self::Checkout(CheckoutError::EmptyCart) => json!({
                "error": "Your cart is empty",
            }),
            Self::Checkout(CheckoutError::TermsNotAccepted) => json!({
                "error": "You must accept the terms and conditions",
            }),
            Self::Checkout(_) => json!({
                "error": "Could not place your order. Please try again.",
            }),
            Self::Backend(BackendError::NotFound(_)) | Self::NotFound(_) => json!({
                "error": "Not found",
            }),
            Self::Backend(_) => json!({
                "error": "External service error",
            }),
            Self::Cart(_) | Self::Internal(_) => json!({
                "error": "Internal server error",
            }),
            Self::BadRequest(message) => json!({
                "error": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkout::FieldErrors;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("maki 7".to_string());
        assert_eq!(err.to_string(), "Not found: maki 7");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(AppError::Backend(BackendError::NotFound("x".to_string()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Backend(BackendError::Api {
                status: 500,
                message: "boom".to_string()
            })),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_checkout_error_status_codes() {
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::EmptyCart)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::TermsNotAccepted)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::Invalid(
                FieldErrors::default()
            ))),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            get_status(AppError::Checkout(CheckoutError::Backend(
                BackendError::Api {
                    status: 500,
                    message: "secret backend detail".to_string()
                }
            ))),
            StatusCode::BAD_GATEWAY
        );
    }
}
