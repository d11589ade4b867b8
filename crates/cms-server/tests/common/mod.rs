#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use cms_server::content::{ContentError, ContentParser};
use cms_server::db::{DocumentStore, MemoryStore, Query, StoreError, StoredDocument};
use cms_server::routes;
use cms_server::{ServiceContext, TimestampFallback};
use cms_shared::Content;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Fallback instant used where a test wants deterministic timestamps.
pub fn fallback_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 12, 0, 0).unwrap()
}

pub const FALLBACK_ISO: &str = "2020-01-01T12:00:00.000Z";

/// A small site: published and draft articles across two types, products
/// with groups and relations, teasers, header and footer.
pub fn site_seed() -> Value {
    json!({
        "articles": [
            {
                "id": "welcome",
                "name": "Welcome",
                "name_sub": "Start here",
                "tags": ["intro", "news"],
                "teaser": "Hello there",
                "type": "article",
                "path": "/news/welcome",
                "slug": "/news/welcome",
                "page_image": "img_123",
                "page_image_url": "/images/welcome.jpg",
                "link": { "href": "/elsewhere" },
                "article_group": "g-news",
                "status": "live",
                "published": true,
                "content": "# Welcome\n\nGlad you came.",
                "metadata": { "title": "Welcome | Site", "keywords": "welcome, intro" },
                "created_on": "2024-02-01T08:00:00Z",
                "updated_on": { "seconds": 1_706_860_800, "nanos": 0 },
            },
            {
                "id": "draft",
                "name": "Draft",
                "type": "article",
                "slug": "/news/draft",
                "article_group": "g-news",
                "published": false,
            },
            {
                "id": "bare",
                "type": "article",
                "slug": "bare",
                "published": true,
            },
            {
                "id": "about",
                "name": "About us",
                "type": "page",
                "path": "/about",
                "slug": "about",
                "published": true,
                "content": [
                    { "type": "header", "value": "Who we are" },
                    { "type": "text", "value": "A *small* team." },
                    { "type": "button", "link_text": "Contact", "link_href": "/contact" },
                ],
            },
            {
                "id": "broken",
                "name": "Broken",
                "type": "broken",
                "slug": "broken",
                "published": true,
                "content": [{ "type": "carousel" }],
            },
        ],
        "article_groups": [
            { "id": "g-news", "name": "News", "path": "/news", "teaser": "Latest", "published": true },
            { "id": "g-old", "name": "Archive", "published": false },
        ],
        "products": [
            {
                "id": "p1",
                "name": "Chair",
                "teaser": "Sit down",
                "path": "/products/chair",
                "slug": "/products/furniture/chair",
                "product_group": "furniture",
                "page_image_url": "/images/chair.jpg",
                "images": [
                    { "url": "/images/chair-1.jpg", "alt": "Front", "width": 800, "height": 600 },
                    "/images/chair-2.jpg",
                ],
                "related_products": ["p3", "missing", "p2"],
                "content": "A **comfortable** chair.",
                "metadata": { "title": "Chair" },
                "published": true,
            },
            {
                "id": "p2",
                "name": "Table",
                "path": "/products/table",
                "slug": "/products/furniture/table",
                "product_group": "furniture",
                "published": true,
            },
            {
                "id": "p3",
                "name": "Prototype lamp",
                "slug": "/products/lighting/lamp",
                "product_group": "lighting",
                "published": false,
            },
        ],
        "product_groups": [
            { "id": "furniture", "name": "Furniture", "path": "/products/furniture", "published": true },
            { "id": "lighting", "name": "Lighting", "published": false },
        ],
        "teasers": [
            {
                "id": "t-text",
                "header": "Opening hours",
                "markdown": "Mon-Fri **9-17**",
                "path": "/contact",
                "image": { "url": "/images/clock.png", "alt": "Clock" },
                "published": true,
            },
            { "id": "t-article", "article": "welcome", "published": true },
            { "id": "t-draft-ref", "article": "draft", "published": true },
            { "id": "t-hidden", "header": "Hidden", "published": false },
        ],
        "site": [
            {
                "id": "header",
                "logo_url": "/logo.svg",
                "logo_alt": "Site",
                "links": [
                    { "text": "News", "href": "/news" },
                    { "text": "Products", "href": "/products" },
                ],
            },
        ],
    })
}

pub fn seeded_store() -> MemoryStore {
    MemoryStore::from_seed(site_seed()).unwrap()
}

/// Context over the seed with deterministic timestamp fallback.
pub fn context() -> ServiceContext {
    ServiceContext::from_store(seeded_store())
        .with_timestamp_fallback(TimestampFallback::Fixed(fallback_instant()))
}

pub fn failing_context() -> ServiceContext {
    ServiceContext::from_store(FailingStore)
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Store whose every call fails, as an unreachable backend would.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn get(&self, _collection: &str, _id: &str) -> Result<Option<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn query(&self, _query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}

/// Content parser that rejects everything.
pub struct FailingContentParser;

#[async_trait]
impl ContentParser for FailingContentParser {
    async fn parse(&self, _raw: Option<&Value>) -> Result<Content, ContentError> {
        Err(ContentError::Malformed("parser offline".to_string()))
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

pub fn app(ctx: ServiceContext) -> Router {
    routes::create_router(ctx)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
