//! Typed reads over schemaless document fields.
//!
//! A field that is missing, null, or of the wrong JSON type reads as absent.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::{Map, Value};

use super::StoredDocument;

pub fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    match fields.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// String field, or `""` when absent
pub fn string_or_default(fields: &Map<String, Value>, key: &str) -> String {
    string_field(fields, key).unwrap_or_default()
}

/// List of strings; non-string entries are dropped.
pub fn string_list(fields: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match fields.get(key) {
        Some(Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}

pub fn bool_field(fields: &Map<String, Value>, key: &str) -> Option<bool> {
    fields.get(key).and_then(Value::as_bool)
}

pub fn u32_field(fields: &Map<String, Value>, key: &str) -> Option<u32> {
    fields
        .get(key)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// Document id named by a link. Links are stored as the bare id or as a
/// reference path (`.../{collection}/{id}`) whose last segment is the id.
pub fn reference_id(link: &str) -> Option<&str> {
    link.rsplit('/').next().filter(|id| !id.is_empty())
}

/// Whether `value` links to document `id` of `collection`.
pub fn links_to(value: &Value, collection: &str, id: &str) -> bool {
    let Some(link) = value.as_str() else {
        return false;
    };
    if !link.contains('/') {
        return link == id;
    }

    let mut segments = link.rsplit('/');
    segments.next() == Some(id) && segments.next() == Some(collection)
}

pub fn timestamp_field(fields: &Map<String, Value>, key: &str) -> Option<DateTime<Utc>> {
    fields.get(key).and_then(parse_timestamp)
}

/// Accepts the shapes a stored timestamp shows up in:
/// an RFC 3339 string, epoch milliseconds, or a `{seconds, nanos}` object
/// (with or without the leading underscores the admin SDKs emit).
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::Object(map) => {
            let seconds = map
                .get("seconds")
                .or_else(|| map.get("_seconds"))
                .and_then(Value::as_i64)?;
            let nanos = map
                .get("nanos")
                .or_else(|| map.get("nanoseconds"))
                .or_else(|| map.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Utc.timestamp_opt(seconds, nanos).single()
        }
        _ => None,
    }
}

impl StoredDocument {
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|v| !v.is_null())
    }

    pub fn string(&self, key: &str) -> Option<String> {
        string_field(&self.fields, key)
    }

    pub fn string_or_default(&self, key: &str) -> String {
        string_or_default(&self.fields, key)
    }

    pub fn string_list(&self, key: &str) -> Option<Vec<String>> {
        string_list(&self.fields, key)
    }

    /// Id of the document a link field points at.
    pub fn reference(&self, key: &str) -> Option<String> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .and_then(reference_id)
            .map(str::to_string)
    }

    /// Ids of the documents a list of links points at.
    pub fn reference_list(&self, key: &str) -> Option<Vec<String>> {
        self.string_list(key).map(|links| {
            links
                .iter()
                .filter_map(|link| reference_id(link))
                .map(str::to_string)
                .collect()
        })
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        bool_field(&self.fields, key)
    }

    pub fn timestamp(&self, key: &str) -> Option<DateTime<Utc>> {
        timestamp_field(&self.fields, key)
    }

    pub fn is_published(&self) -> bool {
        self.bool("published") == Some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn wrong_types_read_as_absent() {
        let f = fields(json!({ "name": 42, "tags": "a,b", "published": "yes" }));

        assert_eq!(string_or_default(&f, "name"), "");
        assert_eq!(string_list(&f, "tags"), None);
        assert_eq!(bool_field(&f, "published"), None);
    }

    #[test]
    fn string_list_skips_non_strings() {
        let f = fields(json!({ "tags": ["news", 3, null, "events"] }));
        assert_eq!(
            string_list(&f, "tags"),
            Some(vec!["news".to_string(), "events".to_string()])
        );
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let ts = parse_timestamp(&json!("2024-03-01T10:15:00+01:00")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T09:15:00+00:00");
    }

    #[test]
    fn parses_seconds_objects() {
        let plain = parse_timestamp(&json!({ "seconds": 1_700_000_000, "nanos": 500 })).unwrap();
        let admin = parse_timestamp(&json!({ "_seconds": 1_700_000_000, "_nanoseconds": 500 })).unwrap();

        assert_eq!(plain, admin);
        assert_eq!(plain.timestamp(), 1_700_000_000);
        assert_eq!(plain.timestamp_subsec_nanos(), 500);
    }

    #[test]
    fn parses_epoch_millis() {
        let ts = parse_timestamp(&json!(1_700_000_000_123_i64)).unwrap();
        assert_eq!(ts.timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn garbage_timestamps_are_absent() {
        assert_eq!(parse_timestamp(&json!("yesterday")), None);
        assert_eq!(parse_timestamp(&json!({ "nanos": 1 })), None);
        assert_eq!(parse_timestamp(&json!(true)), None);
    }

    #[test]
    fn null_raw_fields_are_absent() {
        let doc = StoredDocument::new("x", fields(json!({ "content": null, "published": true })));
        assert!(doc.raw("content").is_none());
        assert!(doc.is_published());
    }

    #[test]
    fn references_resolve_to_document_ids() {
        let doc = StoredDocument::new(
            "t1",
            fields(json!({
                "article": "projects/demo/databases/(default)/documents/articles/welcome",
                "group": "news",
                "related": ["p2", "projects/demo/databases/(default)/documents/products/p3", "trailing/"],
                "broken": "articles/",
            })),
        );

        assert_eq!(doc.reference("article").as_deref(), Some("welcome"));
        assert_eq!(doc.reference("group").as_deref(), Some("news"));
        assert_eq!(doc.reference("broken"), None);
        assert_eq!(doc.reference("missing"), None);
        assert_eq!(
            doc.reference_list("related"),
            Some(vec!["p2".to_string(), "p3".to_string()])
        );
    }

    #[test]
    fn links_check_the_target_collection() {
        let path = json!("projects/demo/databases/(default)/documents/article_groups/g1");

        assert!(links_to(&path, "article_groups", "g1"));
        assert!(!links_to(&path, "product_groups", "g1"));
        assert!(links_to(&json!("g1"), "article_groups", "g1"));
        assert!(!links_to(&json!(1), "article_groups", "1"));
    }
}
