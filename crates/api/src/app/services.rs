//! Service wiring: collection registry, snapshot cache, session store.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use thiserror::Error;

use stockage_auth::{AccessError, SessionStore, SessionToken, SharedSecret};
use stockage_core::CollectionId;
use stockage_infra::{FetchError, JsonFileSource, RecordSource, SnapshotCache};
use stockage_report::{AgingReport, FilterSet};

use crate::app::AppConfig;

pub struct AppServices {
    secret: SharedSecret,
    pub sessions: SessionStore,
    sources: HashMap<CollectionId, Arc<dyn RecordSource>>,
    cache: SnapshotCache,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown collection: {0}")]
    UnknownCollection(CollectionId),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Build the service graph: one JSON document source per `*.json` file in
/// the data directory, keyed by file stem.
pub fn build_services(config: AppConfig) -> anyhow::Result<AppServices> {
    let mut sources: HashMap<CollectionId, Arc<dyn RecordSource>> = HashMap::new();

    let entries = std::fs::read_dir(&config.data_dir)
        .with_context(|| format!("reading data dir {}", config.data_dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        match CollectionId::new(stem) {
            Ok(collection) => {
                tracing::info!(collection = %collection, path = %path.display(), "registered collection");
                sources.insert(
                    collection.clone(),
                    Arc::new(JsonFileSource::new(collection, path)),
                );
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping data file with unusable name");
            }
        }
    }

    Ok(AppServices {
        secret: SharedSecret::new(config.password.into_bytes()),
        sessions: SessionStore::new(),
        sources,
        cache: SnapshotCache::new(),
    })
}

impl AppServices {
    /// Check a password attempt; a fresh authorized session on success.
    pub fn login(&self, attempt: &[u8]) -> Result<SessionToken, AccessError> {
        self.sessions.login(&self.secret, attempt)
    }

    /// Registered collection ids, sorted.
    pub fn collections(&self) -> Vec<CollectionId> {
        let mut ids: Vec<_> = self.sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Run one report render over the (cached) snapshot for `collection`.
    pub async fn report(
        &self,
        collection: &CollectionId,
        filters: &FilterSet,
        now: DateTime<Utc>,
    ) -> Result<AgingReport, ReportError> {
        let source = self
            .sources
            .get(collection)
            .ok_or_else(|| ReportError::UnknownCollection(collection.clone()))?;

        let snapshot = self.cache.get_or_fetch(collection, source.as_ref()).await?;
        Ok(stockage_report::run(&snapshot, filters, now))
    }
}
