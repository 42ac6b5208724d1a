//! Process-wide snapshot cache.
//!
//! One fetch per collection per process; re-filtering a report reuses the
//! cached snapshot and never re-fetches. There is deliberately no
//! invalidation: a long-lived process serves the snapshot it first loaded,
//! and the stale-data window that implies is an accepted operational
//! trade-off (restart to refresh).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use stockage_core::CollectionId;
use stockage_report::InventoryRecord;

use crate::source::{FetchError, RecordSource};

#[derive(Debug, Default)]
pub struct SnapshotCache {
    inner: RwLock<HashMap<CollectionId, Arc<Vec<InventoryRecord>>>>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot for `collection`, fetching it on first use.
    ///
    /// A fetch failure is returned to the caller and nothing is cached, so
    /// the next render retries the fetch.
    pub async fn get_or_fetch(
        &self,
        collection: &CollectionId,
        source: &dyn RecordSource,
    ) -> Result<Arc<Vec<InventoryRecord>>, FetchError> {
        if let Some(snapshot) = self.inner.read().await.get(collection) {
            return Ok(Arc::clone(snapshot));
        }

        let rows = source.fetch_all().await?;
        tracing::info!(collection = %collection, rows = rows.len(), "snapshot loaded");

        let mut cache = self.inner.write().await;
        // Two renders may race the first fetch; keep whichever landed first.
        let snapshot = cache
            .entry(collection.clone())
            .or_insert_with(|| Arc::new(rows));
        Ok(Arc::clone(snapshot))
    }
}
