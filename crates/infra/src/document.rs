//! Source document mapping.
//!
//! Documents arrive with the upstream field names (`Pais`, `Codigo_SAP`,
//! `Fecha_Ingreso`, `Stock_Actual`, `U_Estilo`). Unknown fields, including
//! the store's `_id`, are ignored. Intake dates are parsed best-effort: an
//! unparseable value becomes `None` rather than an error, so one bad date
//! never sinks a whole fetch. Stock must be a whole number; anything else is
//! a malformed payload.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use stockage_report::InventoryRecord;

/// One raw document as stored in a collection.
#[derive(Debug, Clone, Deserialize)]
pub struct StockDocument {
    #[serde(rename = "Pais", default)]
    pub country: String,

    #[serde(rename = "Codigo_SAP", default)]
    pub product_code: String,

    #[serde(rename = "Fecha_Ingreso", default)]
    pub intake_date: Option<Value>,

    #[serde(rename = "Stock_Actual")]
    pub current_stock: serde_json::Number,

    #[serde(rename = "U_Estilo", default)]
    pub style: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("stock value is not a whole number: {0}")]
    NonIntegerStock(String),
}

impl StockDocument {
    pub fn into_record(self) -> Result<InventoryRecord, DocumentError> {
        let current_stock = parse_stock(&self.current_stock)?;
        Ok(InventoryRecord {
            country: self.country,
            product_code: self.product_code,
            intake_at: self.intake_date.as_ref().and_then(parse_intake_date),
            current_stock,
            style: self.style,
        })
    }
}

fn parse_stock(n: &serde_json::Number) -> Result<i64, DocumentError> {
    if let Some(v) = n.as_i64() {
        return Ok(v);
    }
    // Document stores frequently hand integers back as doubles (12.0).
    if let Some(f) = n.as_f64() {
        if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            return Ok(f as i64);
        }
    }
    Err(DocumentError::NonIntegerStock(n.to_string()))
}

/// Best-effort intake date parsing; anything unusable coerces to `None`.
fn parse_intake_date(value: &Value) -> Option<DateTime<Utc>> {
    let s = value.as_str()?.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(at.with_timezone(&Utc));
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(at.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
