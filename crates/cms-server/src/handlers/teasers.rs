use axum::{
    extract::{Path, State},
    Json,
};
use cms_shared::{api::TeasersResponse, Teaser};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::teasers;

/// GET /api/v1/teasers
pub async fn list_teasers(
    State(state): State<AppState>,
) -> Result<Json<TeasersResponse>, AppError> {
    let teasers = teasers::get_all_teasers(&state.services).await?;
    Ok(Json(TeasersResponse { teasers }))
}

/// GET /api/v1/teasers/:id
pub async fn get_teaser(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Teaser>, AppError> {
    teasers::get_teaser(&state.services, &id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}
