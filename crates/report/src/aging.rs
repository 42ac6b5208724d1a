//! Months-in-inventory classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// Day count that stands in for one month of shelf time.
pub const DAYS_PER_MONTH: i64 = 30;

/// Age bucket, in the fixed order the report presents them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeBucket {
    Months1To6,
    Months7To11,
    Months12To23,
    Months24Plus,
}

impl AgeBucket {
    /// Presentation order: youngest stock first, open-ended bucket last.
    pub const ALL: [AgeBucket; 4] = [
        AgeBucket::Months1To6,
        AgeBucket::Months7To11,
        AgeBucket::Months12To23,
        AgeBucket::Months24Plus,
    ];

    /// Bucket for a month count. Closed ranges: [0,6], [7,11], [12,23], [24,∞).
    ///
    /// Negative counts (intake date in the future) land in the lowest bucket;
    /// accepted behavior, not corrected here.
    pub fn for_months(months: i64) -> AgeBucket {
        match months {
            m if m <= 6 => AgeBucket::Months1To6,
            7..=11 => AgeBucket::Months7To11,
            12..=23 => AgeBucket::Months12To23,
            _ => AgeBucket::Months24Plus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Months1To6 => "1-6 months",
            AgeBucket::Months7To11 => "7-11 months",
            AgeBucket::Months12To23 => "12-23 months",
            AgeBucket::Months24Plus => "24+ months",
        }
    }

    /// Position in [`AgeBucket::ALL`].
    pub fn index(&self) -> usize {
        match self {
            AgeBucket::Months1To6 => 0,
            AgeBucket::Months7To11 => 1,
            AgeBucket::Months12To23 => 2,
            AgeBucket::Months24Plus => 3,
        }
    }
}

impl core::fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A record that survived classification: it had a usable intake date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgedRecord {
    pub country: String,
    pub current_stock: i64,
    pub months_in_inventory: i64,
    pub bucket: AgeBucket,
}

/// Whole months elapsed between intake and `now`, floor division of the
/// elapsed days by [`DAYS_PER_MONTH`]. True floor, so a future intake date
/// yields a negative count rather than rounding toward zero.
pub fn months_in_inventory(intake_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - intake_at).num_days().div_euclid(DAYS_PER_MONTH)
}

/// Classify one record against `now`.
///
/// Records without an intake date are excluded from classification entirely
/// (they appear in no aged output); the caller keeps them in the raw totals.
pub fn classify(record: &InventoryRecord, now: DateTime<Utc>) -> Option<AgedRecord> {
    let intake_at = record.intake_at?;
    let months = months_in_inventory(intake_at, now);
    Some(AgedRecord {
        country: record.country.clone(),
        current_stock: record.current_stock,
        months_in_inventory: months,
        bucket: AgeBucket::for_months(months),
    })
}
