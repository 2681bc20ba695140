//! Client for the orders backend (buyer directory + order resource).

use reqwest::StatusCode;
use serde::Deserialize;

use makiya_core::{OrderId, OrderStatus, UserId};

use super::types::{NewOrder, NewUser, OrderUpdate, RemoteOrder, RemoteUser};
use super::{BackendError, api_error};

/// Error body shape returned by the orders backend.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// The duplicate-email rejection detail emitted by buyer creation.
const DUPLICATE_EMAIL_DETAIL: &str = "Email already exists";

/// Filter parameters for listing orders.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub user_id: Option<UserId>,
}

/// Client for the orders backend.
#[derive(Clone)]
pub struct OrdersClient {
    client: reqwest::Client,
    base_url: String,
}

impl OrdersClient {
    /// Create a new orders backend client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    // =========================================================================
    // Buyer directory
    // =========================================================================

    /// Fetch the full buyer directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_users(&self) -> Result<Vec<RemoteUser>, BackendError> {
        let url = format!("{}/users/", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single buyer by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the buyer does not exist.
    pub async fn get_user(&self, id: UserId) -> Result<RemoteUser, BackendError> {
        let url = format!("{}/users/{id}/", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Create a buyer record.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::DuplicateEmail` when the backend rejects the
    /// email as already registered; any other non-success response becomes
    /// `BackendError::Api`.
    pub async fn create_user(&self, user: &NewUser) -> Result<RemoteUser, BackendError> {
        let url = format!("{}/users/", self.base_url);
        let response = self.client.post(&url).json(user).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if status == StatusCode::BAD_REQUEST
                && serde_json::from_str::<ApiErrorBody>(&message)
                    .is_ok_and(|body| body.detail == DUPLICATE_EMAIL_DETAIL)
            {
                return Err(BackendError::DuplicateEmail);
            }
            return Err(BackendError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders, optionally filtered by status and/or buyer.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<RemoteOrder>, BackendError> {
        let url = format!("{}/orders/", self.base_url);

        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        if let Some(user_id) = filter.user_id {
            query.push(("user_id", user_id.to_string()));
        }

        let mut request = self.client.get(&url);
        if !query.is_empty() {
            request = request.query(&query);
        }
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single order by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the order does not exist.
    pub async fn get_order(&self, id: OrderId) -> Result<RemoteOrder, BackendError> {
        let url = format!("{}/orders/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Create an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn create_order(&self, order: &NewOrder) -> Result<RemoteOrder, BackendError> {
        let url = format!("{}/orders/", self.base_url);
        let response = self.client.post(&url).json(order).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Partially update an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn update_order(
        &self,
        id: OrderId,
        update: &OrderUpdate,
    ) -> Result<RemoteOrder, BackendError> {
        let url = format!("{}/orders/{id}", self.base_url);
        let response = self.client.put(&url).json(update).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn delete_order(&self, id: OrderId) -> Result<(), BackendError> {
        let url = format!("{}/orders/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }

    /// Cheap connectivity probe used by the readiness endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or unhealthy.
    pub async fn ping(&self) -> Result<(), BackendError> {
        let url = format!("{}/users/", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}
