use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{
    articles as article_handlers, products as product_handlers, site as site_handlers,
    teasers as teaser_handlers,
};
use crate::services::ServiceContext;

#[derive(Clone)]
pub struct AppState {
    pub services: ServiceContext,
}

pub fn create_router(services: ServiceContext) -> Router {
    let state = AppState { services };

    let article_routes = Router::new()
        .route("/", get(article_handlers::list_articles))
        .route("/paths", get(article_handlers::list_article_paths))
        .route("/by-slug/:slug", get(article_handlers::get_article_by_slug))
        .route("/featured/:type", get(article_handlers::get_featured_article))
        .route("/:id", get(article_handlers::get_article));

    let article_group_routes = Router::new()
        .route("/", get(article_handlers::list_article_groups))
        .route("/:id/articles", get(article_handlers::list_articles_by_group));

    let product_routes = Router::new()
        .route("/", get(product_handlers::list_products))
        .route("/paths", get(product_handlers::list_product_paths))
        .route("/:id", get(product_handlers::get_product))
        .route("/:id/related", get(product_handlers::list_related_products))
        .route("/:id/images", get(product_handlers::list_related_images));

    let product_group_routes = Router::new()
        .route("/", get(product_handlers::list_product_groups))
        .route("/:id/products", get(product_handlers::list_products_by_group));

    let teaser_routes = Router::new()
        .route("/", get(teaser_handlers::list_teasers))
        .route("/:id", get(teaser_handlers::get_teaser));

    let api_routes = Router::new()
        .nest("/articles", article_routes)
        .nest("/article-groups", article_group_routes)
        .nest("/products", product_routes)
        .nest("/product-groups", product_group_routes)
        .nest("/teasers", teaser_routes)
        .route("/header", get(site_handlers::get_header))
        .route("/footer", get(site_handlers::get_footer));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
