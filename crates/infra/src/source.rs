//! Read-only record sources.

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use stockage_core::CollectionId;
use stockage_report::InventoryRecord;

use crate::document::StockDocument;

/// A fetch failed. Fatal for the render that asked: the pipeline only ever
/// runs over a complete row set, never a partial one, and there is no retry
/// policy here.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("source io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed payload: {0}")]
    Malformed(String),
}

/// One-shot loader for a collection's full row set.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, FetchError>;
}

/// Source backed by a JSON document file (an array of raw documents).
pub struct JsonFileSource {
    collection: CollectionId,
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(collection: CollectionId, path: impl Into<PathBuf>) -> Self {
        Self {
            collection,
            path: path.into(),
        }
    }

    pub fn collection(&self) -> &CollectionId {
        &self.collection
    }
}

#[async_trait]
impl RecordSource for JsonFileSource {
    async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, FetchError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let documents: Vec<StockDocument> = serde_json::from_slice(&bytes)
            .map_err(|e| FetchError::Malformed(format!("{}: {e}", self.collection)))?;

        let mut records = Vec::with_capacity(documents.len());
        for (i, doc) in documents.into_iter().enumerate() {
            let record = doc.into_record().map_err(|e| {
                FetchError::Malformed(format!("{} document {i}: {e}", self.collection))
            })?;
            records.push(record);
        }

        tracing::debug!(
            collection = %self.collection,
            records = records.len(),
            "fetched collection snapshot"
        );
        Ok(records)
    }
}

/// Fixed row set, for tests and local runs.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    rows: Vec<InventoryRecord>,
}

impl InMemorySource {
    pub fn new(rows: Vec<InventoryRecord>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RecordSource for InMemorySource {
    async fn fetch_all(&self) -> Result<Vec<InventoryRecord>, FetchError> {
        Ok(self.rows.clone())
    }
}
