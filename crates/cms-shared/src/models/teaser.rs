use serde::{Deserialize, Serialize};

use super::{Article, TeaserImage};

/// Inline-authored teaser
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teaser {
    pub id: String,
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<TeaserImage>,
}

/// An entry in a teaser list: either authored text or a referenced article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeaserItem {
    Text(Teaser),
    Article(Article),
}

impl TeaserItem {
    pub fn id(&self) -> &str {
        match self {
            Self::Text(teaser) => &teaser.id,
            Self::Article(article) => &article.id,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Text(teaser) => &teaser.path,
            Self::Article(article) => &article.path,
        }
    }
}
