use serde::{Deserialize, Serialize};

use super::{Content, Metadata};

/// Route parameters for static page generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteParams {
    pub id: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePath {
    pub params: RouteParams,
}

impl RoutePath {
    pub fn new(id: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            params: RouteParams {
                id: id.into(),
                slug: slug.into(),
            },
        }
    }
}

pub type ArticlePath = RoutePath;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    pub teaser: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    pub page_image_url: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    pub created_on: String,
    pub updated_on: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleGroup {
    pub id: String,
    pub name: String,
    pub path: String,
    pub teaser: String,
}
