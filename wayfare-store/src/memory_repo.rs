use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;
use wayfare_domain::{Document, DocumentSource, FieldFilter, SourceError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Seed file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unexpected seed layout: {0}")]
    Shape(String),
}

/// In-process stand-in for the hosted document store.
///
/// Collections are plain lists of documents kept in insertion order.
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    strict: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            strict: false,
        }
    }

    /// Fetching a collection that was never written becomes an error
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Seed from a JSON object mapping collection name to an array of documents.
    pub fn from_seed_value(seed: Value) -> Result<Self, StoreError> {
        let Value::Object(seed) = seed else {
            return Err(StoreError::Shape("top level must be an object".into()));
        };

        let mut collections = HashMap::new();
        for (name, docs) in seed {
            let Value::Array(docs) = docs else {
                return Err(StoreError::Shape(format!("collection '{}' must be an array", name)));
            };
            let docs = docs
                .into_iter()
                .map(|value| {
                    let mut doc = Document::from_value(value).ok_or_else(|| {
                        StoreError::Shape(format!("collection '{}' holds a non-object entry", name))
                    })?;
                    if doc.id.is_empty() {
                        doc.id = Uuid::new_v4().to_string();
                    }
                    Ok(doc)
                })
                .collect::<Result<Vec<_>, StoreError>>()?;
            collections.insert(name, docs);
        }

        Ok(Self {
            collections: RwLock::new(collections),
            strict: false,
        })
    }

    pub async fn from_seed_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await?;
        let store = Self::from_seed_value(serde_json::from_str(&raw)?)?;
        info!("Seeded document store from {}", path.display());
        Ok(store)
    }

    /// Append a document, assigning a fresh id when it has none. Returns the id.
    pub async fn insert(&self, collection: &str, mut doc: Document) -> String {
        if doc.id.is_empty() {
            doc.id = Uuid::new_v4().to_string();
        }
        let id = doc.id.clone();
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(doc);
        id
    }

    pub async fn replace_collection(&self, collection: &str, docs: Vec<Document>) {
        self.collections
            .write()
            .await
            .insert(collection.to_string(), docs);
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl DocumentSource for MemoryStore {
    async fn fetch_all(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Document>, SourceError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            if self.strict {
                return Err(SourceError::UnknownCollection(collection.to_string()));
            }
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| filter.map_or(true, |f| f.matches(doc)))
            .cloned()
            .collect())
    }
}
