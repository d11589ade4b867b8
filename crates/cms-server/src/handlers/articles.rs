use axum::{
    extract::{Path, Query, State},
    Json,
};
use cms_shared::{
    api::{
        ArticleGroupsResponse, ArticleListParams, ArticlePathsResponse, ArticlesResponse,
        PathListParams, SlugParams,
    },
    Article,
};

use crate::error::AppError;
use crate::routes::AppState;
use crate::services::articles::{self, DEFAULT_TYPE};

/// GET /api/v1/articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ArticleListParams>,
) -> Result<Json<ArticlesResponse>, AppError> {
    let kind = params.kind.as_deref().unwrap_or(DEFAULT_TYPE);
    let articles = articles::get_articles(&state.services, kind).await?;

    Ok(Json(ArticlesResponse { articles }))
}

/// GET /api/v1/articles/paths
pub async fn list_article_paths(
    State(state): State<AppState>,
    Query(params): Query<PathListParams>,
) -> Result<Json<ArticlePathsResponse>, AppError> {
    let kind = params.kind.as_deref().unwrap_or(DEFAULT_TYPE);
    let published = params.published.unwrap_or(true);
    let paths = articles::get_article_paths(&state.services, kind, published).await?;

    Ok(Json(ArticlePathsResponse { paths }))
}

/// GET /api/v1/articles/:id
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, AppError> {
    articles::get_article(&state.services, &id)
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// GET /api/v1/articles/by-slug/:slug
pub async fn get_article_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<SlugParams>,
) -> Result<Json<Article>, AppError> {
    let path = params.path.unwrap_or_default();

    articles::get_article_by_slug(&state.services, &slug, &path)
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// GET /api/v1/articles/featured/:type
pub async fn get_featured_article(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Article>, AppError> {
    let article = articles::get_article_by_type(&state.services, &kind).await?;
    Ok(Json(article))
}

/// GET /api/v1/article-groups
pub async fn list_article_groups(
    State(state): State<AppState>,
) -> Result<Json<ArticleGroupsResponse>, AppError> {
    let groups = articles::get_article_groups(&state.services).await?;
    Ok(Json(ArticleGroupsResponse { groups }))
}

/// GET /api/v1/article-groups/:id/articles
pub async fn list_articles_by_group(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<Json<ArticlesResponse>, AppError> {
    let articles = articles::get_articles_by_group(&state.services, &group_id).await?;
    Ok(Json(ArticlesResponse { articles }))
}
