use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductGroup, ProductImage, ProductPath, RelatedProduct};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProductPathParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductPathsResponse {
    pub paths: Vec<ProductPath>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelatedProductsResponse {
    pub products: Vec<RelatedProduct>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductImagesResponse {
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductGroupsResponse {
    pub groups: Vec<ProductGroup>,
}
