//! Query and mapping services, one module per entity kind.
//!
//! Each service builds an equality query against the document store and maps
//! the returned documents into view models from `cms_shared`. Mapping is an
//! explicit allow-list: raw storage fields (image ids, link objects, raw
//! content and metadata, group references) never reach a view model as-is.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use cms_shared::{Image, NavLink, RoutePath};
use serde_json::Value;

use crate::content::{ContentError, ContentParser, MarkdownContentParser};
use crate::db::{string_or_default, u32_field, DocumentStore, DynStore, StoreError, StoredDocument};

pub mod articles;
pub mod products;
pub mod site;
pub mod teasers;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Document not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// What to report for a creation/update time the store does not have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimestampFallback {
    /// The time of the call
    #[default]
    Now,
    Fixed(DateTime<Utc>),
}

impl TimestampFallback {
    pub fn resolve(&self, stored: Option<DateTime<Utc>>) -> DateTime<Utc> {
        match (stored, self) {
            (Some(ts), _) => ts,
            (None, Self::Now) => Utc::now(),
            (None, Self::Fixed(ts)) => *ts,
        }
    }

    /// ISO-8601 with millisecond precision and a `Z` suffix
    pub fn iso(&self, stored: Option<DateTime<Utc>>) -> String {
        self.resolve(stored)
            .to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Everything a service call needs. Cheap to clone; holds no per-call state.
#[derive(Clone)]
pub struct ServiceContext {
    pub store: DynStore,
    pub content: Arc<dyn ContentParser>,
    pub timestamps: TimestampFallback,
}

impl ServiceContext {
    pub fn new(store: DynStore) -> Self {
        Self {
            store,
            content: Arc::new(MarkdownContentParser),
            timestamps: TimestampFallback::Now,
        }
    }

    pub fn from_store(store: impl DocumentStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    pub fn with_content_parser(mut self, parser: impl ContentParser + 'static) -> Self {
        self.content = Arc::new(parser);
        self
    }

    pub fn with_timestamp_fallback(mut self, fallback: TimestampFallback) -> Self {
        self.timestamps = fallback;
        self
    }

    fn created_on(&self, doc: &StoredDocument) -> String {
        self.timestamps.iso(doc.timestamp("created_on"))
    }

    fn updated_on(&self, doc: &StoredDocument) -> String {
        self.timestamps.iso(doc.timestamp("updated_on"))
    }
}

/// Collapse a lookup into an optional value. Not-found is silent; store and
/// content failures are logged before being reported as absent.
pub fn found<T>(result: Result<T, ServiceError>, kind: &str, key: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(ServiceError::NotFound) => None,
        Err(e) => {
            tracing::warn!("{} lookup '{}' failed, reporting as absent: {}", kind, key, e);
            None
        }
    }
}

/// Final `/`-separated segment of a stored slug
pub fn last_segment(slug: &str) -> &str {
    slug.rsplit('/').next().unwrap_or(slug)
}

/// Stored slug for a lookup under an optional section prefix.
pub fn full_slug(slug: &str, path: &str) -> String {
    if path.is_empty() {
        slug.to_string()
    } else {
        format!("/{}/{}", path, slug)
    }
}

fn route_path(doc: &StoredDocument) -> RoutePath {
    let slug = doc.string_or_default("slug");
    RoutePath::new(doc.id.clone(), last_segment(&slug))
}

/// An image stored either as a bare URL or as `{url, alt, width, height}`.
fn image_from_value(value: &Value) -> Option<Image> {
    match value {
        Value::String(url) if !url.is_empty() => Some(Image {
            url: url.clone(),
            ..Image::default()
        }),
        Value::Object(fields) => {
            let url = string_or_default(fields, "url");
            if url.is_empty() {
                return None;
            }
            Some(Image {
                url,
                alt: string_or_default(fields, "alt"),
                width: u32_field(fields, "width"),
                height: u32_field(fields, "height"),
            })
        }
        _ => None,
    }
}

fn images_from_value(value: Option<&Value>) -> Vec<Image> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(image_from_value).collect(),
        _ => Vec::new(),
    }
}

fn nav_links(value: Option<&Value>) -> Vec<NavLink> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(Value::as_object)
        .map(|link| NavLink {
            text: string_or_default(link, "text"),
            href: string_or_default(link, "href"),
        })
        .filter(|link| !link.href.is_empty())
        .collect()
}
