use cms_shared::{Product, ProductGroup, ProductImage, ProductPath, RelatedProduct};
use futures::future::try_join_all;

use super::{found, images_from_value, route_path, ServiceContext, ServiceError};
use crate::db::{Query, StoredDocument};
use crate::metadata::parse_metadata;

pub const COLLECTION: &str = "products";
pub const GROUP_COLLECTION: &str = "product_groups";

fn product_summary(ctx: &ServiceContext, doc: &StoredDocument) -> Product {
    Product {
        id: doc.id.clone(),
        name: doc.string_or_default("name"),
        teaser: doc.string_or_default("teaser"),
        path: doc.string_or_default("path"),
        group_id: doc.reference("product_group").unwrap_or_default(),
        page_image_url: doc.string_or_default("page_image_url"),
        images: images_from_value(doc.raw("images")),
        status: doc.string_or_default("status"),
        created_on: ctx.created_on(doc),
        updated_on: ctx.updated_on(doc),
        ..Product::default()
    }
}

async fn product_detail(ctx: &ServiceContext, doc: &StoredDocument) -> Result<Product, ServiceError> {
    let content = ctx.content.parse(doc.raw("content")).await?;

    Ok(Product {
        name_sub: doc.string("name_sub"),
        content: Some(content),
        metadata: Some(parse_metadata(doc.raw("metadata"))),
        ..product_summary(ctx, doc)
    })
}

pub async fn get_product_paths(
    ctx: &ServiceContext,
    published: bool,
) -> Result<Vec<ProductPath>, ServiceError> {
    let query = Query::collection(COLLECTION).where_eq("published", published);
    let docs = ctx.store.query(&query).await?;

    Ok(docs.iter().map(route_path).collect())
}

pub async fn get_products(ctx: &ServiceContext) -> Result<Vec<Product>, ServiceError> {
    let query = Query::collection(COLLECTION).where_eq("published", true);
    let docs = ctx.store.query(&query).await?;

    Ok(docs.iter().map(|doc| product_summary(ctx, doc)).collect())
}

pub async fn get_products_by_group(
    ctx: &ServiceContext,
    group_id: &str,
) -> Result<Vec<Product>, ServiceError> {
    let query = Query::collection(COLLECTION)
        .where_ref("product_group", GROUP_COLLECTION, group_id)
        .where_eq("published", true);
    let docs = ctx.store.query(&query).await?;

    Ok(docs.iter().map(|doc| product_summary(ctx, doc)).collect())
}

pub async fn find_product(ctx: &ServiceContext, id: &str) -> Result<Product, ServiceError> {
    let doc = ctx
        .store
        .get(COLLECTION, id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    product_detail(ctx, &doc).await
}

pub async fn get_product(ctx: &ServiceContext, id: &str) -> Option<Product> {
    found(find_product(ctx, id).await, "product", id)
}

/// Published products listed in the product's `related_products` ids, in
/// listed order. Missing or unpublished references are skipped.
pub async fn get_related_products(
    ctx: &ServiceContext,
    product_id: &str,
) -> Result<Vec<RelatedProduct>, ServiceError> {
    let Some(product) = ctx.store.get(COLLECTION, product_id).await? else {
        return Ok(Vec::new());
    };
    let related_ids = product.reference_list("related_products").unwrap_or_default();

    let docs = try_join_all(
        related_ids
            .iter()
            .map(|id| ctx.store.get(COLLECTION, id)),
    )
    .await?;

    Ok(docs
        .into_iter()
        .flatten()
        .filter(StoredDocument::is_published)
        .map(|doc| RelatedProduct {
            page_image_url: doc.string_or_default("page_image_url"),
            name: doc.string_or_default("name"),
            path: doc.string_or_default("path"),
            id: doc.id,
        })
        .collect())
}

pub async fn get_related_images(
    ctx: &ServiceContext,
    product_id: &str,
) -> Result<Vec<ProductImage>, ServiceError> {
    let images = ctx
        .store
        .get(COLLECTION, product_id)
        .await?
        .map(|doc| images_from_value(doc.raw("images")))
        .unwrap_or_default();

    Ok(images)
}

pub async fn get_product_groups(ctx: &ServiceContext) -> Result<Vec<ProductGroup>, ServiceError> {
    let query = Query::collection(GROUP_COLLECTION).where_eq("published", true);
    let docs = ctx.store.query(&query).await?;

    Ok(docs
        .iter()
        .map(|doc| ProductGroup {
            id: doc.id.clone(),
            name: doc.string_or_default("name"),
            path: doc.string_or_default("path"),
            teaser: doc.string_or_default("teaser"),
            page_image_url: doc.string_or_default("page_image_url"),
        })
        .collect())
}
