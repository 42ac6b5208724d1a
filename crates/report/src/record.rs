//! Raw stock rows as supplied by the loader.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of stock for a product line collection.
///
/// Created by the loader, immutable within a report run; the pipeline never
/// mutates rows, it derives from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Country the stock sits in (source field `Pais`).
    pub country: String,

    /// SAP product code (source field `Codigo_SAP`).
    pub product_code: String,

    /// Intake timestamp (source field `Fecha_Ingreso`).
    ///
    /// `None` when the source value was missing or unparseable. Such rows
    /// still count toward the headline total but are excluded from
    /// date-based filtering and from every aged output.
    pub intake_at: Option<DateTime<Utc>>,

    /// Units currently on hand (source field `Stock_Actual`).
    pub current_stock: i64,

    /// Style code (source field `U_Estilo`).
    pub style: String,
}
