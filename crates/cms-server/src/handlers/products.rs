use axum::{
    extract::{Path, Query, State},
    Json,
};
use cms_shared::{
    api::{
        ProductGroupsResponse, ProductImagesResponse, ProductPathParams, ProductPathsResponse,
        ProductsResponse, RelatedProductsResponse,
    },
    Product,
};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::products;

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = products::get_products(&state.services).await?;
    Ok(Json(ProductsResponse { products }))
}

/// GET /api/v1/products/paths
pub async fn list_product_paths(
    State(state): State<AppState>,
    Query(params): Query<ProductPathParams>,
) -> Result<Json<ProductPathsResponse>, AppError> {
    let published = params.published.unwrap_or(true);
    let paths = products::get_product_paths(&state.services, published).await?;

    Ok(Json(ProductPathsResponse { paths }))
}

/// GET /api/v1/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    products::get_product(&state.services, &id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// GET /api/v1/products/:id/related
pub async fn list_related_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RelatedProductsResponse>, AppError> {
    let products = products::get_related_products(&state.services, &id).await?;
    Ok(Json(RelatedProductsResponse { products }))
}

/// GET /api/v1/products/:id/images
pub async fn list_related_images(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductImagesResponse>, AppError> {
    let images = products::get_related_images(&state.services, &id).await?;
    Ok(Json(ProductImagesResponse { images }))
}

/// GET /api/v1/product-groups
pub async fn list_product_groups(
    State(state): State<AppState>,
) -> Result<Json<ProductGroupsResponse>, AppError> {
    let groups = products::get_product_groups(&state.services).await?;
    Ok(Json(ProductGroupsResponse { groups }))
}

/// GET /api/v1/product-groups/:id/products
pub async fn list_products_by_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<ProductsResponse>, AppError> {
    let products = products::get_products_by_group(&state.services, &group_id).await?;
    Ok(Json(ProductsResponse { products }))
}
