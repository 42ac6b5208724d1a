//! Infrastructure layer: the record loader boundary and the process-wide
//! snapshot cache.
//!
//! The report engine consumes a materialized `Vec<InventoryRecord>`; this
//! crate is everything between a document collection and that vector.

pub mod cache;
pub mod document;
pub mod source;

pub use cache::SnapshotCache;
pub use document::StockDocument;
pub use source::{FetchError, InMemorySource, JsonFileSource, RecordSource};
