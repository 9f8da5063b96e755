use async_trait::async_trait;
use serde_json::Value;

use crate::document::Document;

/// Errors a document source can report. The aggregation layer never sees
/// these; callers surface them as "data unavailable".
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Document source unavailable: {0}")]
    Unavailable(String),
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    #[error("Malformed document: {0}")]
    Malformed(String),
}

/// Single field-equality predicate pushed down to the source
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

impl FieldFilter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `id` matches the document identifier, anything else a top-level field.
    pub fn matches(&self, doc: &Document) -> bool {
        if self.field == "id" {
            return self.value.as_str() == Some(doc.id.as_str());
        }
        doc.get(&self.field) == Some(&self.value)
    }
}

/// Bulk read access to the hosted document store
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Fetch every document in `collection`, optionally restricted by `filter`.
    async fn fetch_all(
        &self,
        collection: &str,
        filter: Option<&FieldFilter>,
    ) -> Result<Vec<Document>, SourceError>;
}
