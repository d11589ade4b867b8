use serde::{Deserialize, Serialize};

/// SEO and page metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub image_url: String,
    pub canonical_url: String,
    pub robots: String,
}
