use axum::{extract::State, Json};
use cms_shared::{Footer, Header};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::site;

/// GET /api/v1/header
pub async fn get_header(State(state): State<AppState>) -> Result<Json<Header>, AppError> {
    Ok(Json(site::get_header_data(&state.services).await?))
}

/// GET /api/v1/footer
pub async fn get_footer(State(state): State<AppState>) -> Result<Json<Footer>, AppError> {
    Ok(Json(site::get_footer_data(&state.services).await?))
}
