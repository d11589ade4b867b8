use cms_shared::{Teaser, TeaserItem};
use futures::future::try_join_all;

use super::{articles, found, image_from_value, ServiceContext, ServiceError};
use crate::db::{Query, StoredDocument};

pub const COLLECTION: &str = "teasers";

fn teaser(doc: &StoredDocument) -> Teaser {
    Teaser {
        id: doc.id.clone(),
        header: doc.string_or_default("header"),
        markdown: doc.string("markdown"),
        path: doc.string_or_default("path"),
        image: doc.raw("image").and_then(image_from_value),
    }
}

/// A teaser pointing at an article renders as that article; the reference
/// is dropped when the article is missing or unpublished.
async fn teaser_item(
    ctx: &ServiceContext,
    doc: &StoredDocument,
) -> Result<Option<TeaserItem>, ServiceError> {
    let Some(article_id) = doc.reference("article") else {
        return Ok(Some(TeaserItem::Text(teaser(doc))));
    };

    match ctx.store.get(articles::COLLECTION, &article_id).await? {
        Some(article) if article.is_published() => Ok(Some(TeaserItem::Article(
            articles::article_summary(ctx, &article),
        ))),
        _ => {
            tracing::debug!(
                "Teaser '{}' references unavailable article '{}'",
                doc.id,
                article_id
            );
            Ok(None)
        }
    }
}

/// Published teasers in store order. Article references resolve concurrently.
pub async fn get_all_teasers(ctx: &ServiceContext) -> Result<Vec<TeaserItem>, ServiceError> {
    let query = Query::collection(COLLECTION).where_eq("published", true);
    let docs = ctx.store.query(&query).await?;

    let items = try_join_all(docs.iter().map(|doc| teaser_item(ctx, doc))).await?;
    Ok(items.into_iter().flatten().collect())
}

pub async fn find_teaser(ctx: &ServiceContext, id: &str) -> Result<Teaser, ServiceError> {
    ctx.store
        .get(COLLECTION, id)
        .await?
        .map(|doc| teaser(&doc))
        .ok_or(ServiceError::NotFound)
}

pub async fn get_teaser(ctx: &ServiceContext, id: &str) -> Option<Teaser> {
    found(find_teaser(ctx, id).await, "teaser", id)
}
