//! Monthly breakdown: stock per exact month count, with everything from 24
//! months up collapsed into a single trailing "24+" group.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::aging::{AgeBucket, AgedRecord};
use crate::format;
use crate::summary::BucketSummary;

/// Grouping key for the monthly table.
///
/// The derived `Ord` gives exact counts ascending with the collapsed group
/// last, which is exactly the presentation order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MonthGroup {
    Exact(i64),
    TwentyFourPlus,
}

impl MonthGroup {
    pub fn for_months(months: i64) -> Self {
        if months >= 24 {
            MonthGroup::TwentyFourPlus
        } else {
            MonthGroup::Exact(months)
        }
    }

    /// The bucket this group falls under; the collapsed group is always the
    /// open-ended bucket.
    pub fn bucket(&self) -> AgeBucket {
        match self {
            MonthGroup::Exact(m) => AgeBucket::for_months(*m),
            MonthGroup::TwentyFourPlus => AgeBucket::Months24Plus,
        }
    }

    pub fn label(&self) -> String {
        match self {
            MonthGroup::Exact(m) => format!("{m} months"),
            MonthGroup::TwentyFourPlus => "24+ months".to_string(),
        }
    }
}

/// One row of the per-month table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRow {
    pub month_label: String,
    pub total_stock: i64,
    pub bucket: AgeBucket,
    /// Non-empty only on the first row of each bucket present, e.g.
    /// `"12.34% (1-6 months)"`.
    pub percent_annotation: String,
}

/// Build the monthly table from aged records plus the already-computed
/// bucket summaries (the annotation reuses their percentages verbatim).
///
/// Only months actually present in the data get a row; a bucket that
/// filtering emptied out appears in the summary table at 0% but not here.
pub fn breakdown(aged: &[AgedRecord], summaries: &[BucketSummary; 4]) -> Vec<MonthlyRow> {
    let mut groups: BTreeMap<MonthGroup, i64> = BTreeMap::new();
    for r in aged {
        *groups
            .entry(MonthGroup::for_months(r.months_in_inventory))
            .or_default() += r.current_stock;
    }

    let mut rows = Vec::with_capacity(groups.len());
    let mut prev_bucket: Option<AgeBucket> = None;

    for (group, total_stock) in groups {
        let bucket = group.bucket();
        // Sorted order keeps buckets contiguous, so a bucket change marks
        // exactly one row per bucket present.
        let percent_annotation = if prev_bucket != Some(bucket) {
            let summary = &summaries[bucket.index()];
            format!(
                "{} ({})",
                format::percent(summary.percent_of_total),
                bucket.label()
            )
        } else {
            String::new()
        };
        prev_bucket = Some(bucket);

        rows.push(MonthlyRow {
            month_label: group.label(),
            total_stock,
            bucket,
            percent_annotation,
        });
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarize;

    fn aged(stock: i64, months: i64) -> AgedRecord {
        AgedRecord {
            country: "GT".to_string(),
            current_stock: stock,
            months_in_inventory: months,
            bucket: AgeBucket::for_months(months),
        }
    }

    fn run(records: &[AgedRecord]) -> Vec<MonthlyRow> {
        let summaries = summarize(records).unwrap();
        breakdown(records, &summaries)
    }

    #[test]
    fn groups_by_exact_month_and_sums_stock() {
        let rows = run(&[aged(5, 3), aged(7, 3), aged(2, 9)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month_label, "3 months");
        assert_eq!(rows[0].total_stock, 12);
        assert_eq!(rows[1].month_label, "9 months");
        assert_eq!(rows[1].total_stock, 2);
    }

    #[test]
    fn months_at_or_above_24_collapse_into_one_trailing_group() {
        let rows = run(&[aged(10, 30), aged(15, 30), aged(1, 24), aged(3, 2)]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month_label, "2 months");
        let last = rows.last().unwrap();
        assert_eq!(last.month_label, "24+ months");
        assert_eq!(last.total_stock, 26);
        assert_eq!(last.bucket, AgeBucket::Months24Plus);
    }

    #[test]
    fn rows_ascend_by_month_with_the_collapsed_group_last() {
        let rows = run(&[aged(1, 40), aged(1, 0), aged(1, 13), aged(1, 7)]);
        let labels: Vec<&str> = rows.iter().map(|r| r.month_label.as_str()).collect();
        assert_eq!(labels, vec!["0 months", "7 months", "13 months", "24+ months"]);
    }

    #[test]
    fn first_row_of_each_bucket_carries_the_annotation() {
        // Stocks [10,20,30,40] at months [2,8,15,30]: one row per bucket.
        let rows = run(&[aged(10, 2), aged(20, 8), aged(30, 15), aged(40, 30)]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].percent_annotation, "10.00% (1-6 months)");
        assert_eq!(rows[1].percent_annotation, "20.00% (7-11 months)");
        assert_eq!(rows[2].percent_annotation, "30.00% (12-23 months)");
        assert_eq!(rows[3].percent_annotation, "40.00% (24+ months)");
    }

    #[test]
    fn later_rows_of_the_same_bucket_stay_unannotated() {
        let rows = run(&[aged(10, 1), aged(10, 2), aged(10, 3)]);
        assert_eq!(rows[0].percent_annotation, "100.00% (1-6 months)");
        assert_eq!(rows[1].percent_annotation, "");
        assert_eq!(rows[2].percent_annotation, "");
    }

    #[test]
    fn absent_buckets_emit_no_row_and_no_annotation() {
        // Nothing in 7-11 or 12-23.
        let rows = run(&[aged(10, 2), aged(40, 30)]);
        assert_eq!(rows.len(), 2);
        let annotated = rows
            .iter()
            .filter(|r| !r.percent_annotation.is_empty())
            .count();
        assert_eq!(annotated, 2);
    }

    #[test]
    fn negative_months_sort_first_and_share_the_lowest_bucket_annotation() {
        let rows = run(&[aged(5, -1), aged(5, 0)]);
        assert_eq!(rows[0].month_label, "-1 months");
        assert_eq!(rows[0].percent_annotation, "100.00% (1-6 months)");
        assert_eq!(rows[1].percent_annotation, "");
    }
}
