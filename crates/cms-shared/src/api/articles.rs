use serde::{Deserialize, Serialize};

use crate::models::{Article, ArticleGroup, ArticlePath};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ArticleListParams {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PathListParams {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SlugParams {
    /// Section prefix the slug lives under, e.g. `news`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<Article>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticlePathsResponse {
    pub paths: Vec<ArticlePath>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleGroupsResponse {
    pub groups: Vec<ArticleGroup>,
}
