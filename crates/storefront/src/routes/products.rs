//! Product route handlers - thin passthroughs over the menu backend.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use makiya_core::ProductId;

use crate::backend::Maki;
use crate::error::Result;
use crate::state::AppState;

/// List the maki catalog.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Maki>>> {
    let makis = state.menu().list_makis().await?;
    Ok(Json(makis))
}

/// Show a single maki.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Maki>> {
    let maki = state.menu().get_maki(ProductId::new(id)).await?;
    Ok(Json(maki))
}
