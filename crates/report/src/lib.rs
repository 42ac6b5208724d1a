//! Inventory-aging report engine.
//!
//! This crate contains the deterministic aggregation pipeline behind the
//! aging dashboard, implemented purely as domain logic (no IO, no HTTP,
//! no storage): eligibility + filtering, months-in-inventory
//! classification, bucket totals/percentages, and the per-month breakdown
//! table. The wall clock is always an input; the same snapshot, filter set
//! and `now` produce the same report.

pub mod aging;
pub mod breakdown;
pub mod filter;
pub mod format;
pub mod pipeline;
pub mod record;
pub mod summary;

pub use aging::{classify, months_in_inventory, AgeBucket, AgedRecord};
pub use breakdown::{breakdown, MonthGroup, MonthlyRow};
pub use filter::{apply, eligible, FilterOptions, FilterSet};
pub use pipeline::{run, AgingReport, AgingSection};
pub use record::InventoryRecord;
pub use summary::{summarize, BucketSummary, NoAgedStock};
