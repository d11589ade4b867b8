use cms_shared::{Article, ArticleGroup, ArticlePath};

use super::{found, full_slug, route_path, ServiceContext, ServiceError};
use crate::db::{Query, StoredDocument};
use crate::metadata::parse_metadata;

pub const COLLECTION: &str = "articles";
pub const GROUP_COLLECTION: &str = "article_groups";
pub const DEFAULT_TYPE: &str = "article";

/// Listing view: no content body, no metadata.
pub(crate) fn article_summary(ctx: &ServiceContext, doc: &StoredDocument) -> Article {
    Article {
        id: doc.id.clone(),
        name: doc.string_or_default("name"),
        teaser: doc.string_or_default("teaser"),
        kind: doc.string_or_default("type"),
        path: doc.string_or_default("path"),
        page_image_url: doc.string_or_default("page_image_url"),
        status: doc.string_or_default("status"),
        created_on: ctx.created_on(doc),
        updated_on: ctx.updated_on(doc),
        ..Article::default()
    }
}

async fn article_detail(ctx: &ServiceContext, doc: &StoredDocument) -> Result<Article, ServiceError> {
    let content = ctx.content.parse(doc.raw("content")).await?;

    Ok(Article {
        name_sub: doc.string("name_sub"),
        tags: doc.string_list("tags"),
        content: Some(content),
        metadata: Some(parse_metadata(doc.raw("metadata"))),
        ..article_summary(ctx, doc)
    })
}

fn published_of_type(kind: &str) -> Query {
    Query::collection(COLLECTION)
        .where_eq("type", kind)
        .where_eq("published", true)
}

/// Route parameters for every article of `kind` with the given publication flag.
pub async fn get_article_paths(
    ctx: &ServiceContext,
    kind: &str,
    published: bool,
) -> Result<Vec<ArticlePath>, ServiceError> {
    let query = Query::collection(COLLECTION)
        .where_eq("type", kind)
        .where_eq("published", published);

    let docs = ctx.store.query(&query).await?;
    tracing::debug!("{} article paths for type '{}'", docs.len(), kind);

    Ok(docs.iter().map(route_path).collect())
}

/// Published articles of `kind`, in store order.
pub async fn get_articles(ctx: &ServiceContext, kind: &str) -> Result<Vec<Article>, ServiceError> {
    let docs = ctx.store.query(&published_of_type(kind)).await?;
    Ok(docs.iter().map(|doc| article_summary(ctx, doc)).collect())
}

pub async fn get_article_groups(ctx: &ServiceContext) -> Result<Vec<ArticleGroup>, ServiceError> {
    let query = Query::collection(GROUP_COLLECTION).where_eq("published", true);
    let docs = ctx.store.query(&query).await?;

    Ok(docs
        .iter()
        .map(|doc| ArticleGroup {
            id: doc.id.clone(),
            name: doc.string_or_default("name"),
            path: doc.string_or_default("path"),
            teaser: doc.string_or_default("teaser"),
        })
        .collect())
}

pub async fn get_articles_by_group(
    ctx: &ServiceContext,
    group_id: &str,
) -> Result<Vec<Article>, ServiceError> {
    let query = Query::collection(COLLECTION)
        .where_ref("article_group", GROUP_COLLECTION, group_id)
        .where_eq("published", true);

    let docs = ctx.store.query(&query).await?;
    Ok(docs.iter().map(|doc| article_summary(ctx, doc)).collect())
}

/// Full article by document id, keeping the failure kind.
pub async fn find_article(ctx: &ServiceContext, id: &str) -> Result<Article, ServiceError> {
    let doc = ctx
        .store
        .get(COLLECTION, id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    article_detail(ctx, &doc).await
}

/// Full article by document id; `None` when missing or on any failure.
pub async fn get_article(ctx: &ServiceContext, id: &str) -> Option<Article> {
    found(find_article(ctx, id).await, "article", id)
}

/// First published article whose stored slug is `slug` under `path`.
pub async fn find_article_by_slug(
    ctx: &ServiceContext,
    slug: &str,
    path: &str,
) -> Result<Article, ServiceError> {
    let slug = full_slug(slug, path);
    let query = Query::collection(COLLECTION)
        .where_eq("slug", slug.as_str())
        .where_eq("published", true)
        .limit(1);

    let docs = ctx.store.query(&query).await?;
    let doc = docs.first().ok_or(ServiceError::NotFound)?;

    article_detail(ctx, doc).await
}

pub async fn get_article_by_slug(ctx: &ServiceContext, slug: &str, path: &str) -> Option<Article> {
    let key = full_slug(slug, path);
    found(find_article_by_slug(ctx, slug, path).await, "article", &key)
}

/// First published article of `kind`, or an all-default article when there
/// is none. Store and content failures are returned to the caller.
pub async fn get_article_by_type(ctx: &ServiceContext, kind: &str) -> Result<Article, ServiceError> {
    let docs = ctx.store.query(&published_of_type(kind).limit(1)).await?;

    match docs.first() {
        Some(doc) => article_detail(ctx, doc).await,
        None => {
            tracing::debug!("No published article of type '{}'", kind);
            Ok(Article::default())
        }
    }
}
