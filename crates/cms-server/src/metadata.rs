use cms_shared::Metadata;
use serde_json::{Map, Value};

use crate::db::string_or_default;

/// Normalize a stored `metadata` field. Total: anything that is not an
/// object yields default metadata.
pub fn parse_metadata(raw: Option<&Value>) -> Metadata {
    let Some(Value::Object(fields)) = raw else {
        return Metadata::default();
    };

    Metadata {
        title: string_or_default(fields, "title"),
        description: string_or_default(fields, "description"),
        keywords: keywords(fields),
        image_url: image_url(fields),
        canonical_url: string_or_default(fields, "canonical_url"),
        robots: string_or_default(fields, "robots"),
    }
}

/// Keywords are stored either as a list or as one comma-separated string.
fn keywords(fields: &Map<String, Value>) -> Vec<String> {
    let split = |s: &str| -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    };

    match fields.get("keywords") {
        Some(Value::String(s)) => split(s),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .flat_map(split)
            .collect(),
        _ => Vec::new(),
    }
}

fn image_url(fields: &Map<String, Value>) -> String {
    match fields.get("image_url") {
        Some(Value::String(url)) => url.clone(),
        _ => match fields.get("image") {
            Some(Value::String(url)) => url.clone(),
            Some(Value::Object(image)) => string_or_default(image, "url"),
            _ => String::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_or_malformed_metadata_is_default() {
        assert_eq!(parse_metadata(None), Metadata::default());
        assert_eq!(parse_metadata(Some(&json!("title"))), Metadata::default());
        assert_eq!(parse_metadata(Some(&json!([1, 2]))), Metadata::default());
    }

    #[test]
    fn copies_known_fields() {
        let raw = json!({
            "title": "About us",
            "description": "Who we are",
            "canonical_url": "https://example.com/about",
            "robots": "noindex",
            "tracking_id": "ignored",
        });

        let metadata = parse_metadata(Some(&raw));
        assert_eq!(metadata.title, "About us");
        assert_eq!(metadata.description, "Who we are");
        assert_eq!(metadata.canonical_url, "https://example.com/about");
        assert_eq!(metadata.robots, "noindex");
        assert!(metadata.keywords.is_empty());
        assert_eq!(metadata.image_url, "");
    }

    #[test]
    fn keywords_accept_both_shapes() {
        let from_string = parse_metadata(Some(&json!({ "keywords": "cms, rust ,, news" })));
        let from_list = parse_metadata(Some(&json!({ "keywords": ["cms", " rust", 4, "news"] })));

        assert_eq!(from_string.keywords, ["cms", "rust", "news"]);
        assert_eq!(from_list.keywords, from_string.keywords);
    }

    #[test]
    fn image_url_falls_back_to_image_object() {
        let metadata = parse_metadata(Some(&json!({ "image": { "url": "/og.png", "alt": "x" } })));
        assert_eq!(metadata.image_url, "/og.png");

        let explicit = parse_metadata(Some(&json!({ "image_url": "/a.png", "image": "/b.png" })));
        assert_eq!(explicit.image_url, "/a.png");
    }
}
