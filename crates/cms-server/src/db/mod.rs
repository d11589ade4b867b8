use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::{Config, StoreKind};

mod fields;
mod firestore;
mod memory;

pub use fields::*;
pub use firestore::{FirestoreSettings, FirestoreStore};
pub use memory::MemoryStore;

pub type DynStore = Arc<dyn DocumentStore>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Store responded with {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed store response: {0}")]
    Decode(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A document as returned by the store: its id plus the raw field map.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl StoredDocument {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Condition on a single field
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field holds exactly this value
    Eq { field: String, value: Value },
    /// Field links to document `id` of `collection`, stored either as the
    /// bare id or as a document reference path
    Ref {
        field: String,
        collection: String,
        id: String,
    },
}

impl Filter {
    pub fn matches(&self, doc: &StoredDocument) -> bool {
        match self {
            Filter::Eq { field, value } => doc.fields.get(field) == Some(value),
            Filter::Ref {
                field,
                collection,
                id,
            } => doc
                .fields
                .get(field)
                .is_some_and(|v| links_to(v, collection, id)),
        }
    }
}

/// Filtered read against one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            limit: None,
        }
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Match documents whose `field` links to `collection/id`.
    pub fn where_ref(
        mut self,
        field: impl Into<String>,
        collection: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        self.filters.push(Filter::Ref {
            field: field.into(),
            collection: collection.into(),
            id: id.into(),
        });
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// A document matches when every filter holds.
    pub fn matches(&self, doc: &StoredDocument) -> bool {
        self.filters.iter().all(|f| f.matches(doc))
    }
}

/// Read-only access to a collection-oriented document database.
///
/// Results come back in the store's native order; callers must not assume
/// any particular sort.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<StoredDocument>, StoreError>;

    async fn query(&self, query: &Query) -> Result<Vec<StoredDocument>, StoreError>;
}

pub async fn create_store(config: &Config) -> anyhow::Result<DynStore> {
    match config.store {
        StoreKind::Memory => {
            let store = match &config.seed_file {
                Some(path) => MemoryStore::load_seed_file(path).await?,
                None => MemoryStore::new(),
            };
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(store))
        }
        StoreKind::Firestore => {
            let project_id = config
                .firestore_project_id
                .clone()
                .context("FIRESTORE_PROJECT_ID must be set when CMS_STORE=firestore")?;

            let settings = FirestoreSettings {
                base_url: config.firestore_base_url.clone(),
                project_id,
                database: config.firestore_database.clone(),
                api_key: config.firestore_api_key.clone(),
                timeout: Duration::from_secs(config.store_timeout_secs),
            };
            tracing::info!(
                "Using Firestore document store (project {})",
                settings.project_id
            );

            let store = FirestoreStore::new(settings).context("Could not build Firestore client")?;
            Ok(Arc::new(store))
        }
    }
}
