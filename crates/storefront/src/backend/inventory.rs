//! Client for the inventory backend (ingredient stock records).
//!
//! Consumed only by the admin surface and the seeding CLI; the checkout
//! coordinator never touches inventory.

use makiya_core::IngredientId;

use super::types::{Ingredient, IngredientUpdate, NewIngredient};
use super::{BackendError, api_error};

/// Client for the inventory backend.
#[derive(Clone)]
pub struct InventoryClient {
    client: reqwest::Client,
    base_url: String,
}

impl InventoryClient {
    /// Create a new inventory backend client.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// List all ingredient stock records.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>, BackendError> {
        let url = format!("{}/ingredients", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch a single ingredient by id.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::NotFound` if the ingredient does not exist.
    pub async fn get_ingredient(&self, id: &IngredientId) -> Result<Ingredient, BackendError> {
        let url = format!("{}/ingredients/{id}", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Create an ingredient stock record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn create_ingredient(
        &self,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient, BackendError> {
        let url = format!("{}/ingredients", self.base_url);
        let response = self.client.post(&url).json(ingredient).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Partially update an ingredient stock record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn update_ingredient(
        &self,
        id: &IngredientId,
        update: &IngredientUpdate,
    ) -> Result<Ingredient, BackendError> {
        let url = format!("{}/ingredients/{id}", self.base_url);
        let response = self.client.patch(&url).json(update).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json().await?)
    }

    /// Delete an ingredient stock record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    pub async fn delete_ingredient(&self, id: &IngredientId) -> Result<(), BackendError> {
        let url = format!("{}/ingredients/{id}", self.base_url);
        let response = self.client.delete(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(())
    }
}
