//! Current stock report: per-material balances, average cost, low-stock.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{safe_div, LotId, MaterialId};
use rxstock_store::Snapshot;

/// One contributing lot, kept for drill-down in the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotContribution {
    pub lot_id: LotId,
    pub lot_number: String,
    pub balance: f64,
    pub unit_cost: f64,
    pub value: f64,
    pub expiry: Option<NaiveDate>,
}

/// Per-material stock position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStockRow {
    pub material_id: MaterialId,
    pub material_name: String,
    pub unit: String,
    pub total_balance: f64,
    /// Total value / total balance; 0 when the balance is 0, never NaN.
    pub average_cost: f64,
    pub total_value: f64,
    pub low_stock: bool,
    pub lots: Vec<LotContribution>,
}

/// Current stock across all materials.
///
/// Materials with no positive-balance lot are excluded entirely — a
/// material never appears with balance 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentStockReport {
    pub as_of: DateTime<Utc>,
    pub rows: Vec<CurrentStockRow>,
    pub total_balance: f64,
    pub total_value: f64,
}

impl CurrentStockReport {
    pub fn row(&self, material_id: MaterialId) -> Option<&CurrentStockRow> {
        self.rows.iter().find(|r| r.material_id == material_id)
    }

    pub fn to_csv(&self) -> String {
        use crate::csv::{CsvDoc, Field};

        let mut doc = CsvDoc::new(&[
            "material",
            "unit",
            "balance",
            "average_cost",
            "value",
            "low_stock",
            "lots",
        ]);
        for row in &self.rows {
            doc.row(&[
                Field::Str(&row.material_name),
                Field::Str(&row.unit),
                Field::Num(row.total_balance),
                Field::Num(row.average_cost),
                Field::Num(row.total_value),
                Field::Str(if row.low_stock { "yes" } else { "no" }),
                Field::Count(row.lots.len()),
            ]);
        }
        doc.finish()
    }

    pub fn csv_filename(&self) -> String {
        crate::csv::filename("current-stock", &self.as_of.format("%Y-%m-%d").to_string())
    }
}

/// Aggregate lots with positive balance into per-material positions.
pub fn current_stock(snapshot: &Snapshot) -> CurrentStockReport {
    let mut rows: Vec<CurrentStockRow> = Vec::new();

    for material in snapshot.materials() {
        let lots: Vec<LotContribution> = snapshot
            .lots_of(material.id_typed())
            .filter(|lot| lot.has_balance())
            .map(|lot| LotContribution {
                lot_id: lot.id_typed(),
                lot_number: lot.lot_number().to_string(),
                balance: lot.balance(),
                unit_cost: lot.unit_cost(),
                value: lot.value(),
                expiry: lot.expiry(),
            })
            .collect();

        if lots.is_empty() {
            continue;
        }

        let total_balance: f64 = lots.iter().map(|l| l.balance).sum();
        let total_value: f64 = lots.iter().map(|l| l.value).sum();

        rows.push(CurrentStockRow {
            material_id: material.id_typed(),
            material_name: material.name().to_string(),
            unit: material.unit().to_string(),
            total_balance,
            average_cost: safe_div(total_value, total_balance),
            total_value,
            low_stock: material.is_below_threshold(total_balance),
            lots,
        });
    }

    rows.sort_by(|a, b| a.material_name.cmp(&b.material_name));

    let total_balance = rows.iter().map(|r| r.total_balance).sum();
    let total_value = rows.iter().map(|r| r.total_value).sum();

    CurrentStockReport {
        as_of: snapshot.fetched_at(),
        rows,
        total_balance,
        total_value,
    }
}
