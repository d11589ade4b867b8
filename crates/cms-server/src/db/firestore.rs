use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::{json, Map, Number, Value};

use super::{DocumentStore, Filter, Query, StoreError, StoredDocument};

#[derive(Debug, Clone)]
pub struct FirestoreSettings {
    pub base_url: String,
    pub project_id: String,
    pub database: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

/// Document store backed by the Firestore REST API.
pub struct FirestoreStore {
    client: Client,
    settings: FirestoreSettings,
}

/// A document resource as returned by `GET` and `runQuery`
#[derive(Debug, Deserialize)]
struct FirestoreDocument {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RunQueryItem {
    document: Option<FirestoreDocument>,
}

impl FirestoreStore {
    pub fn new(settings: FirestoreSettings) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    /// Resource name of the configured database's documents root; reference
    /// values are rooted here.
    fn documents_root(&self) -> String {
        format!(
            "projects/{}/databases/{}/documents",
            self.settings.project_id, self.settings.database
        )
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            self.documents_root()
        )
    }

    /// URL of a single document, with collection and id escaped as one path
    /// segment each.
    fn document_url(&self, collection: &str, id: &str) -> Result<Url, StoreError> {
        let mut url = Url::parse(&self.documents_url())
            .map_err(|e| StoreError::Unavailable(format!("bad Firestore base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| StoreError::Unavailable("Firestore base URL cannot hold a path".to_string()))?
            .push(collection)
            .push(id);
        Ok(url)
    }

    fn with_key(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.settings.api_key {
            Some(key) => request.query(&[("key", key)]),
            None => request,
        }
    }

    async fn error_from(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        StoreError::Status { status, message }
    }
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        if !is_document_id(id) {
            tracing::debug!("Firestore get {}: '{}' cannot name a document", collection, id);
            return Ok(None);
        }

        let url = self.document_url(collection, id)?;
        tracing::debug!("Firestore get {}/{}", collection, id);

        let response = self.with_key(self.client.get(url)).send().await?;

        match response.status() {
            StatusCode::OK => {
                let document: FirestoreDocument = response.json().await?;
                Ok(Some(decode_document(document)?))
            }
            StatusCode::NOT_FOUND => Ok(None),
            _ => Err(Self::error_from(response).await),
        }
    }

    async fn query(&self, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        let url = format!("{}:runQuery", self.documents_url());
        tracing::debug!("Firestore runQuery {:?}", query);

        let response = self
            .with_key(self.client.post(&url))
            .json(&structured_query(query, &self.documents_root()))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        // Items without a document carry only read-time progress
        let items: Vec<RunQueryItem> = response.json().await?;
        items
            .into_iter()
            .filter_map(|item| item.document)
            .map(decode_document)
            .collect()
    }
}

/// Firestore ids are single non-empty path segments other than `.` and `..`.
fn is_document_id(id: &str) -> bool {
    !id.is_empty() && id != "." && id != ".." && !id.contains('/')
}

fn field_filter(filter: &Filter, root: &str) -> Value {
    match filter {
        Filter::Eq { field, value } => json!({
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": "EQUAL",
                "value": encode_value(value),
            }
        }),
        // A link may be stored as the bare id or as a reference
        Filter::Ref {
            field,
            collection,
            id,
        } => json!({
            "fieldFilter": {
                "field": { "fieldPath": field },
                "op": "IN",
                "value": {
                    "arrayValue": {
                        "values": [
                            { "stringValue": id },
                            { "referenceValue": format!("{}/{}/{}", root, collection, id) },
                        ]
                    }
                },
            }
        }),
    }
}

/// Build the `runQuery` request body. `root` is the documents resource name
/// that reference values are resolved against.
fn structured_query(query: &Query, root: &str) -> Value {
    let mut structured = json!({
        "from": [{ "collectionId": query.collection }],
    });

    let mut filters: Vec<Value> = query
        .filters
        .iter()
        .map(|f| field_filter(f, root))
        .collect();

    let condition = match filters.len() {
        0 => None,
        1 => filters.pop(),
        _ => Some(json!({
            "compositeFilter": { "op": "AND", "filters": filters }
        })),
    };

    if let Some(condition) = condition {
        structured["where"] = condition;
    }
    if let Some(limit) = query.limit {
        structured["limit"] = json!(limit);
    }

    json!({ "structuredQuery": structured })
}

fn decode_document(document: FirestoreDocument) -> Result<StoredDocument, StoreError> {
    // name is projects/{p}/databases/{d}/documents/{collection}/{id}
    let id = document
        .name
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let fields = decode_fields(document.fields)?;
    Ok(StoredDocument::new(id, fields))
}

fn decode_fields(fields: Map<String, Value>) -> Result<Map<String, Value>, StoreError> {
    fields
        .into_iter()
        .map(|(key, value)| decode_value(value).map(|v| (key, v)))
        .collect()
}

/// Convert a Firestore typed value into plain JSON.
///
/// Timestamps stay RFC 3339 strings; references keep their resource name
/// and are resolved to ids by the field readers.
fn decode_value(value: Value) -> Result<Value, StoreError> {
    let mut typed = match value {
        Value::Object(typed) => typed,
        other => {
            return Err(StoreError::Decode(format!(
                "expected typed value, got {}",
                other
            )))
        }
    };

    if typed.contains_key("nullValue") {
        return Ok(Value::Null);
    }
    if let Some(v) = typed.remove("booleanValue") {
        return Ok(v);
    }
    if let Some(v) = typed.remove("integerValue") {
        // int64 travels as a JSON string
        return match v {
            Value::String(s) => s
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| StoreError::Decode(format!("bad integerValue '{}': {}", s, e))),
            Value::Number(n) => Ok(Value::Number(n)),
            other => Err(StoreError::Decode(format!("bad integerValue {}", other))),
        };
    }
    if let Some(v) = typed.remove("doubleValue") {
        return match v {
            Value::Number(n) => Ok(Value::Number(n)),
            // NaN and infinities arrive as strings and have no JSON form
            Value::String(_) => Ok(Value::Null),
            other => Err(StoreError::Decode(format!("bad doubleValue {}", other))),
        };
    }
    for key in ["stringValue", "timestampValue", "referenceValue", "bytesValue"] {
        if let Some(v) = typed.remove(key) {
            return Ok(v);
        }
    }
    if let Some(v) = typed.remove("geoPointValue") {
        return Ok(v);
    }
    if let Some(array) = typed.remove("arrayValue") {
        let values = match array.get("values") {
            Some(Value::Array(values)) => values.clone(),
            _ => Vec::new(),
        };
        return values
            .into_iter()
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array);
    }
    if let Some(map) = typed.remove("mapValue") {
        let fields = match map {
            Value::Object(mut m) => match m.remove("fields") {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            },
            _ => Map::new(),
        };
        return decode_fields(fields).map(Value::Object);
    }

    Err(StoreError::Decode(format!(
        "unknown value type: {}",
        Value::Object(typed)
    )))
}

/// Convert plain JSON into a Firestore typed value for query filters.
fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => encode_number(n),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(map) => {
            let fields: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), encode_value(v)))
                .collect();
            json!({ "mapValue": { "fields": fields } })
        }
    }
}

fn encode_number(n: &Number) -> Value {
    match n.as_i64() {
        Some(i) => json!({ "integerValue": i.to_string() }),
        None => json!({ "doubleValue": n.as_f64() }),
    }
}
