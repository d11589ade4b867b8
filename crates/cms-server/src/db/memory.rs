use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, Query, StoreError, StoredDocument};

/// In-process document store. Collections keep insertion order, which is
/// the native result order for queries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<StoredDocument>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a fixture of the form
    /// `{ "<collection>": [ { "id": "...", ...fields } ] }`.
    ///
    /// Entries without a string `id` get a generated one.
    pub fn from_seed(seed: Value) -> Result<Self, StoreError> {
        let Value::Object(seed) = seed else {
            return Err(StoreError::Decode(
                "seed must be an object keyed by collection".to_string(),
            ));
        };

        let mut collections = HashMap::new();
        for (collection, entries) in seed {
            let Value::Array(entries) = entries else {
                return Err(StoreError::Decode(format!(
                    "collection '{}' must be an array of documents",
                    collection
                )));
            };

            let mut docs = Vec::with_capacity(entries.len());
            for entry in entries {
                let Value::Object(fields) = entry else {
                    return Err(StoreError::Decode(format!(
                        "documents in '{}' must be objects",
                        collection
                    )));
                };
                docs.push(document_from_fields(fields));
            }
            collections.insert(collection, docs);
        }

        Ok(Self {
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    pub async fn load_seed_file(path: &Path) -> anyhow::Result<Self> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Could not read seed file {}", path.display()))?;
        let seed: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Could not parse seed file {}", path.display()))?;

        let store = Self::from_seed(seed)?;
        tracing::debug!("Seeded memory store from {}", path.display());
        Ok(store)
    }

    /// Insert or replace a document, keeping its original position on replace.
    pub async fn insert(&self, collection: &str, doc: StoredDocument) {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        match docs.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => *existing = doc,
            None => docs.push(doc),
        }
    }

    /// Insert raw JSON fields and return the document id.
    pub async fn insert_json(&self, collection: &str, fields: Map<String, Value>) -> String {
        let doc = document_from_fields(fields);
        let id = doc.id.clone();
        self.insert(collection, doc).await;
        id
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

fn document_from_fields(mut fields: Map<String, Value>) -> StoredDocument {
    let id = match fields.remove("id") {
        Some(Value::String(id)) => id,
        _ => Uuid::new_v4().to_string(),
    };
    StoredDocument::new(id, fields)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn query(&self, query: &Query) -> Result<Vec<StoredDocument>, StoreError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(&query.collection) else {
            return Ok(Vec::new());
        };

        let matching = docs.iter().filter(|d| query.matches(d)).cloned();
        Ok(match query.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }
}
