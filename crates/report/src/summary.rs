//! Bucket aggregator: per-bucket totals and share of the filtered total.

use serde::Serialize;
use thiserror::Error;

use crate::aging::{AgeBucket, AgedRecord};

/// One row of the bucket summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSummary {
    pub bucket: AgeBucket,
    pub total_stock: i64,
    /// Share of the aged total, in [0, 1].
    pub percent_of_total: f64,
}

/// The filtered working set aged to a zero total, so bucket shares are
/// undefined. Surfaced as an explicit no-data state, never as NaN or a
/// division by zero.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("no aged stock after filtering")]
pub struct NoAgedStock;

/// Summarize aged records into exactly four rows, one per bucket in fixed
/// order, zero totals included.
pub fn summarize(aged: &[AgedRecord]) -> Result<[BucketSummary; 4], NoAgedStock> {
    let mut totals = [0i64; 4];
    for r in aged {
        totals[r.bucket.index()] += r.current_stock;
    }

    let grand: i64 = totals.iter().sum();
    if grand == 0 {
        return Err(NoAgedStock);
    }

    Ok(AgeBucket::ALL.map(|bucket| BucketSummary {
        bucket,
        total_stock: totals[bucket.index()],
        percent_of_total: totals[bucket.index()] as f64 / grand as f64,
    }))
}
