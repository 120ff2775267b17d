//! Raw rows as fetched from the hosted backend.
//!
//! Numeric columns are nullable and occasionally dirty; normalization into
//! domain types happens in [`crate::snapshot`], never here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use rxstock_catalog::{MaterialKind, Unit};
use rxstock_core::{LotId, MaterialId, MovementId};
use rxstock_stock::MovementKind;

/// Material row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub id: MaterialId,
    pub name: String,
    pub kind: MaterialKind,
    pub unit: Unit,
    #[serde(default)]
    pub reorder_threshold: Option<f64>,
}

/// Lot row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotRow {
    pub id: LotId,
    pub material_id: MaterialId,
    pub lot_number: String,
    pub received_at: DateTime<Utc>,
    #[serde(default)]
    pub expiry: Option<NaiveDate>,
    #[serde(default)]
    pub unit_cost: Option<f64>,
    #[serde(default)]
    pub balance: Option<f64>,
}

/// Movement row as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementRow {
    pub id: MovementId,
    pub lot_id: LotId,
    #[serde(default)]
    pub quantity: Option<f64>,
    pub kind: MovementKind,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub reference: Option<String>,
}
