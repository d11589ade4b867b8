//! JSON surface over the services.

mod common;

use axum::http::StatusCode;
use common::{app, body_json, context, failing_context, get};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = get(app(context()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn article_listing_defaults_to_article_type() {
    let response = get(app(context()), "/api/v1/articles").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let articles = json["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0]["id"], "welcome");
    assert_eq!(articles[1]["name"], "");
}

#[tokio::test]
async fn article_listing_by_type_param() {
    let json = body_json(get(app(context()), "/api/v1/articles?type=page").await).await;
    assert_eq!(json["articles"][0]["id"], "about");
}

#[tokio::test]
async fn article_paths_with_published_param() {
    let json = body_json(get(app(context()), "/api/v1/articles/paths?published=false").await).await;

    assert_eq!(json["paths"].as_array().unwrap().len(), 1);
    assert_eq!(json["paths"][0]["params"]["id"], "draft");
    assert_eq!(json["paths"][0]["params"]["slug"], "draft");
}

#[tokio::test]
async fn article_detail_and_not_found() {
    let response = get(app(context()), "/api/v1/articles/welcome").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["content"]["kind"], "markdown");
    assert_eq!(json["metadata"]["title"], "Welcome | Site");

    let missing = get(app(context()), "/api/v1/articles/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(missing).await["error"], "Resource not found");
}

#[tokio::test]
async fn store_failure_on_detail_reads_as_not_found() {
    let response = get(app(failing_context()), "/api/v1/articles/welcome").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn article_by_slug_uses_path_param() {
    let ok = get(app(context()), "/api/v1/articles/by-slug/welcome?path=news").await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["id"], "welcome");

    let bare = get(app(context()), "/api/v1/articles/by-slug/welcome").await;
    assert_eq!(bare.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn featured_article_is_default_when_absent() {
    let json = body_json(get(app(context()), "/api/v1/articles/featured/nothing").await).await;

    assert_eq!(json["id"], "");
    assert_eq!(json["name"], "");
    assert!(json.get("content").is_none());
}

#[tokio::test]
async fn listing_store_failure_is_bad_gateway() {
    let response = get(app(failing_context()), "/api/v1/articles").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["error"], "Document store error");
}

#[tokio::test]
async fn content_failure_on_featured_is_server_error() {
    let response = get(app(context()), "/api/v1/articles/featured/broken").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn article_groups_and_members() {
    let groups = body_json(get(app(context()), "/api/v1/article-groups").await).await;
    assert_eq!(groups["groups"][0]["id"], "g-news");

    let members = body_json(get(app(context()), "/api/v1/article-groups/g-news/articles").await).await;
    assert_eq!(members["articles"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn product_routes() {
    let products = body_json(get(app(context()), "/api/v1/products").await).await;
    assert_eq!(products["products"].as_array().unwrap().len(), 2);

    let paths = body_json(get(app(context()), "/api/v1/products/paths").await).await;
    assert_eq!(paths["paths"][0]["params"]["slug"], "chair");

    let chair = body_json(get(app(context()), "/api/v1/products/p1").await).await;
    assert_eq!(chair["images"][0]["width"], 800);

    let related = body_json(get(app(context()), "/api/v1/products/p1/related").await).await;
    assert_eq!(related["products"][0]["id"], "p2");

    let images = body_json(get(app(context()), "/api/v1/products/p1/images").await).await;
    assert_eq!(images["images"].as_array().unwrap().len(), 2);

    let groups = body_json(get(app(context()), "/api/v1/product-groups").await).await;
    assert_eq!(groups["groups"][0]["id"], "furniture");

    let grouped = body_json(get(app(context()), "/api/v1/product-groups/furniture/products").await).await;
    assert_eq!(grouped["products"].as_array().unwrap().len(), 2);

    let missing = get(app(context()), "/api/v1/products/nope").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn teaser_routes_tag_item_kind() {
    let json = body_json(get(app(context()), "/api/v1/teasers").await).await;
    let teasers = json["teasers"].as_array().unwrap();

    assert_eq!(teasers[0]["kind"], "text");
    assert_eq!(teasers[0]["header"], "Opening hours");
    assert_eq!(teasers[1]["kind"], "article");
    assert_eq!(teasers[1]["type"], "article");

    let single = get(app(context()), "/api/v1/teasers/t-text").await;
    assert_eq!(single.status(), StatusCode::OK);
}

#[tokio::test]
async fn header_and_footer_routes() {
    let header = body_json(get(app(context()), "/api/v1/header").await).await;
    assert_eq!(header["links"][0]["text"], "News");

    let footer = body_json(get(app(context()), "/api/v1/footer").await).await;
    assert_eq!(footer["copyright"], "");
    assert_eq!(footer["links"].as_array().unwrap().len(), 0);
}
