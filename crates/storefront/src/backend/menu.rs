//! Client for the menu backend (maki catalog).
//!
//! Product reads are cached in-memory via `moka` with a short TTL - the
//! catalog changes rarely and product detail pages hit it constantly.
//! Writes invalidate the cached entry.

use std::time::Duration;

use moka::future::Cache;

use makiya_core::ProductId;

use super::types::{Maki, NewMaki};
use super::{BackendError, api_error};

/// Cache TTL for product reads.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of cached products.
const CACHE_CAPACITY: u64 = 1_000;

/// Client for the menu backend.
#[derive(Clone)]
pub struct MenuClient {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<i32, Maki>,
}

impl MenuClient {
    /// Create a new menu backend client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            cache: Cache::builder()
                .max_capacity(CACHE_CAPACITY)
                .time_to_live(CACHE_TTL)
                .build(),
        }
    }

    /// List the full maki catalog. Not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_makis(&self) -> Result<Vec<Maki>, BackendError> {
        let url = format!("{}/makis", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single maki by id, serving from cache when warm.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the maki does not exist.
    pub async fn get_maki(&self, id: ProductId) -> Result<Maki, BackendError> {
        if let Some(maki) = self.cache.get(&id.as_i32()).await {
            return Ok(maki);
        }

        let url = format!("{}/makis/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let maki: Maki = response.json().await?;
        self.cache.insert(id.as_i32(), maki.clone()).await;
        Ok(maki)
    }

    /// Create a maki.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn create_maki(&self, maki: &NewMaki) -> Result<Maki, BackendError> {
        let url = format!("{}/makis", self.base_url);
        let response = self.client.post(&url).json(maki).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Replace a maki.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn update_maki(&self, id: ProductId, maki: &NewMaki) -> Result<Maki, BackendError> {
        let url = format!("{}/makis/{id}", self.base_url);
        let response = self.client.put(&url).json(maki).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        self.cache.invalidate(&id.as_i32()).await;
        Ok(response.json().await?)
    }

    /// Delete a maki.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn delete_maki(&self, id: ProductId) -> Result<(), BackendError> {
        let url = format!("{}/makis/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        self.cache.invalidate(&id.as_i32()).await;
        Ok(())
    }
}
