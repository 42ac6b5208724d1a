//! Response DTOs and query-string filter parsing.
//!
//! The report surface is presentation-ready: totals carry thousands
//! separators, percentages are 2-decimal strings, and the monthly table
//! annotates only bucket-transition rows, exactly as the dashboard shows
//! them.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;

use stockage_core::CollectionId;
use stockage_report::{format, AgingReport, FilterSet};

use crate::app::errors::json_error;

/// Parse the filter query string into a `FilterSet`.
///
/// A dimension may be repeated (`?country=GT&country=SV`) or carry a
/// comma-separated list (`?country=GT,SV`); every occurrence folds into the
/// same set. An absent parameter leaves its dimension unconstrained.
/// Parameters outside the five dimensions are ignored.
pub fn parse_filters(
    params: &[(String, String)],
) -> Result<FilterSet, axum::response::Response> {
    let mut filters = FilterSet::default();

    for (key, raw) in params {
        match key.as_str() {
            "country" => filters.countries.extend(split(raw).map(str::to_string)),
            "code" => filters.codes.extend(split(raw).map(str::to_string)),
            "style" => filters.styles.extend(split(raw).map(str::to_string)),
            "year" => {
                for part in split(raw) {
                    let year: i32 = part.parse().map_err(|_| {
                        json_error(
                            StatusCode::BAD_REQUEST,
                            "invalid_year",
                            format!("'{part}' is not a year"),
                        )
                    })?;
                    filters.years.insert(year);
                }
            }
            "month" => {
                for part in split(raw) {
                    let month: u32 =
                        part.parse().ok().filter(|m| (1..=12).contains(m)).ok_or_else(|| {
                            json_error(
                                StatusCode::BAD_REQUEST,
                                "invalid_month",
                                format!("'{part}' is not a month number (1-12)"),
                            )
                        })?;
                    filters.months.insert(month);
                }
            }
            _ => {}
        }
    }

    Ok(filters)
}

fn split(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct MonthOption {
    pub number: u32,
    pub name: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FilterOptionsDto {
    pub countries: Vec<String>,
    pub codes: Vec<String>,
    pub years: Vec<i32>,
    pub months: Vec<MonthOption>,
    pub styles: Vec<String>,
}

/// One percentage KPI card.
#[derive(Debug, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
}

/// One row of the 4-row bucket summary table.
#[derive(Debug, Serialize)]
pub struct BucketRow {
    pub bucket: &'static str,
    pub total_stock: String,
    pub percent_of_total: String,
}

/// One row of the per-month table.
#[derive(Debug, Serialize)]
pub struct MonthlyRowDto {
    pub months_in_inventory: String,
    pub total_stock: String,
    /// Empty except on bucket-transition rows.
    pub percent_of_total: String,
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub collection: String,
    pub generated_at: DateTime<Utc>,
    /// Headline total over the eligible snapshot, before user filters.
    pub total_stock: String,
    pub filtered_stock: String,
    pub filters: FilterOptionsDto,
    /// True when nothing aged after filtering; the tables below are empty
    /// rather than full of NaN percentages.
    pub no_data: bool,
    pub kpis: Vec<KpiCard>,
    pub buckets: Vec<BucketRow>,
    pub monthly: Vec<MonthlyRowDto>,
}

impl ReportResponse {
    pub fn from_report(collection: &CollectionId, report: AgingReport) -> Self {
        let filters = FilterOptionsDto {
            countries: report.filter_options.countries,
            codes: report.filter_options.codes,
            years: report.filter_options.years,
            months: report
                .filter_options
                .months
                .iter()
                .map(|&number| MonthOption {
                    number,
                    name: format::month_name(number).unwrap_or("Unknown"),
                })
                .collect(),
            styles: report.filter_options.styles,
        };

        let (no_data, kpis, buckets, monthly) = match report.aging {
            Some(section) => {
                let kpis = section
                    .buckets
                    .iter()
                    .map(|b| KpiCard {
                        label: b.bucket.label(),
                        value: format::percent(b.percent_of_total),
                    })
                    .collect();
                let buckets = section
                    .buckets
                    .iter()
                    .map(|b| BucketRow {
                        bucket: b.bucket.label(),
                        total_stock: format::thousands(b.total_stock),
                        percent_of_total: format::percent(b.percent_of_total),
                    })
                    .collect();
                let monthly = section
                    .monthly
                    .into_iter()
                    .map(|r| MonthlyRowDto {
                        months_in_inventory: r.month_label,
                        total_stock: format::thousands(r.total_stock),
                        percent_of_total: r.percent_annotation,
                    })
                    .collect();
                (false, kpis, buckets, monthly)
            }
            None => (true, Vec::new(), Vec::new(), Vec::new()),
        };

        Self {
            collection: collection.to_string(),
            generated_at: report.generated_at,
            total_stock: format::thousands(report.total_stock),
            filtered_stock: format::thousands(report.filtered_stock),
            filters,
            no_data,
            kpis,
            buckets,
            monthly,
        }
    }
}
