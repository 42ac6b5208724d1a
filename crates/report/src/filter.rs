//! Filter engine: eligibility precondition, predicate filtering, and the
//! option domains that back the filter selectors.

use std::collections::BTreeSet;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::record::InventoryRecord;

/// The user's current selections, one set per dimension.
///
/// An empty set means "no filter on that dimension", never "match nothing".
/// Constructed fresh per interaction; stateless.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    pub countries: BTreeSet<String>,
    pub codes: BTreeSet<String>,
    /// Calendar years of the intake date.
    pub years: BTreeSet<i32>,
    /// 1-based month numbers of the intake date.
    pub months: BTreeSet<u32>,
    pub styles: BTreeSet<String>,
}

impl FilterSet {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.codes.is_empty()
            && self.years.is_empty()
            && self.months.is_empty()
            && self.styles.is_empty()
    }

    fn matches(&self, record: &InventoryRecord) -> bool {
        if !self.countries.is_empty() && !self.countries.contains(&record.country) {
            return false;
        }
        if !self.codes.is_empty() && !self.codes.contains(&record.product_code) {
            return false;
        }
        if !self.styles.is_empty() && !self.styles.contains(&record.style) {
            return false;
        }
        // Date dimensions: a row without an intake date never matches an
        // active year/month filter.
        if !self.years.is_empty() {
            match record.intake_at {
                Some(at) if self.years.contains(&at.year()) => {}
                _ => return false,
            }
        }
        if !self.months.is_empty() {
            match record.intake_at {
                Some(at) if self.months.contains(&at.month()) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Standing precondition, applied once per report before any filtering:
/// rows with less than one unit on hand take no part in the report.
pub fn eligible(rows: &[InventoryRecord]) -> Vec<InventoryRecord> {
    rows.iter()
        .filter(|r| r.current_stock >= 1)
        .cloned()
        .collect()
}

/// Retain the rows matching every active dimension of `filters`.
///
/// Pure: returns a new collection, never mutates the input.
pub fn apply(rows: &[InventoryRecord], filters: &FilterSet) -> Vec<InventoryRecord> {
    rows.iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect()
}

/// Selectable values per dimension, derived from the **unfiltered** snapshot:
/// distinct non-empty values, sorted ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub countries: Vec<String>,
    pub codes: Vec<String>,
    pub years: Vec<i32>,
    pub months: Vec<u32>,
    pub styles: Vec<String>,
}

impl FilterOptions {
    pub fn collect(rows: &[InventoryRecord]) -> Self {
        let mut countries = BTreeSet::new();
        let mut codes = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut months = BTreeSet::new();
        let mut styles = BTreeSet::new();

        for r in rows {
            if !r.country.is_empty() {
                countries.insert(r.country.clone());
            }
            if !r.product_code.is_empty() {
                codes.insert(r.product_code.clone());
            }
            if !r.style.is_empty() {
                styles.insert(r.style.clone());
            }
            if let Some(at) = r.intake_at {
                years.insert(at.year());
                months.insert(at.month());
            }
        }

        Self {
            countries: countries.into_iter().collect(),
            codes: codes.into_iter().collect(),
            years: years.into_iter().collect(),
            months: months.into_iter().collect(),
            styles: styles.into_iter().collect(),
        }
    }
}
