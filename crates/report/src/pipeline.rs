//! The composed report pipeline.
//!
//! One call turns a raw snapshot + filter selections + `now` into everything
//! a render needs. Recomputed from scratch on every filter change; nothing
//! here is cached or persisted.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aging;
use crate::breakdown::{self, MonthlyRow};
use crate::filter::{self, FilterOptions, FilterSet};
use crate::record::InventoryRecord;
use crate::summary::{self, BucketSummary};

/// The aged portion of a report: KPI percentages, the 4-row summary table,
/// and the per-month breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgingSection {
    pub buckets: [BucketSummary; 4],
    pub monthly: Vec<MonthlyRow>,
}

/// A complete report over one collection snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgingReport {
    pub generated_at: DateTime<Utc>,

    /// Headline: total eligible stock before user filters.
    pub total_stock: i64,

    /// Selector domains, derived from the unfiltered eligible snapshot.
    pub filter_options: FilterOptions,

    /// Stock total of the filtered working set (aged or not).
    pub filtered_stock: i64,

    /// `None` is the explicit no-data state: nothing aged after filtering,
    /// so bucket shares are undefined.
    pub aging: Option<AgingSection>,
}

/// Run the full pipeline.
///
/// `now` is injected so the same inputs always produce the same report; the
/// caller passes the wall clock per render, which is why results drift as
/// stock sits another day.
pub fn run(rows: &[InventoryRecord], filters: &FilterSet, now: DateTime<Utc>) -> AgingReport {
    let eligible = filter::eligible(rows);
    let total_stock = eligible.iter().map(|r| r.current_stock).sum();
    let filter_options = FilterOptions::collect(&eligible);

    let filtered = filter::apply(&eligible, filters);
    let filtered_stock = filtered.iter().map(|r| r.current_stock).sum();

    let aged: Vec<_> = filtered
        .iter()
        .filter_map(|r| aging::classify(r, now))
        .collect();

    let aging = match summary::summarize(&aged) {
        Ok(buckets) => {
            let monthly = breakdown::breakdown(&aged, &buckets);
            Some(AgingSection { buckets, monthly })
        }
        Err(summary::NoAgedStock) => None,
    };

    AgingReport {
        generated_at: now,
        total_stock,
        filter_options,
        filtered_stock,
        aging,
    }
}
