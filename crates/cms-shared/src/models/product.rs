use serde::{Deserialize, Serialize};

use super::{Content, Image, Metadata, RoutePath};

pub type ProductPath = RoutePath;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_sub: Option<String>,
    pub teaser: String,
    pub path: String,
    /// Id of the product group this product belongs to
    pub group_id: String,
    pub page_image_url: String,
    pub images: Vec<Image>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub created_on: String,
    pub updated_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: String,
    pub name: String,
    pub path: String,
    pub teaser: String,
    pub page_image_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedProduct {
    pub id: String,
    pub name: String,
    pub path: String,
    pub page_image_url: String,
}
