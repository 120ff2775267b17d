//! Stock movement report: opening/in/out/closing per material over a
//! closed date range.

use serde::{Deserialize, Serialize};

use rxstock_core::{safe_div, DateRange, MaterialId};
use rxstock_stock::{balance_before, flow_within};
use rxstock_store::Snapshot;

/// Per-material movement summary for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovementRow {
    pub material_id: MaterialId,
    pub material_name: String,
    pub unit: String,
    /// Balance immediately before the range start (strict replay).
    pub opening: f64,
    pub total_in: f64,
    pub total_out: f64,
    /// opening + in − out.
    pub closing: f64,
    /// Closing balance × current weighted-average unit cost.
    pub closing_value: f64,
}

/// Movement summary across all tracked materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockMovementReport {
    pub range: DateRange,
    pub rows: Vec<StockMovementRow>,
}

impl StockMovementReport {
    pub fn row(&self, material_id: MaterialId) -> Option<&StockMovementRow> {
        self.rows.iter().find(|r| r.material_id == material_id)
    }

    pub fn to_csv(&self) -> String {
        use crate::csv::{CsvDoc, Field};

        let mut doc = CsvDoc::new(&[
            "material",
            "unit",
            "opening",
            "in",
            "out",
            "closing",
            "closing_value",
        ]);
        for row in &self.rows {
            doc.row(&[
                Field::Str(&row.material_name),
                Field::Str(&row.unit),
                Field::Num(row.opening),
                Field::Num(row.total_in),
                Field::Num(row.total_out),
                Field::Num(row.closing),
                Field::Num(row.closing_value),
            ]);
        }
        doc.finish()
    }

    pub fn csv_filename(&self) -> String {
        crate::csv::filename("stock-movement", &self.range.slug())
    }
}

/// Replay the movement log per material over a closed range.
///
/// Needs the *full* snapshot: the opening balance replays everything
/// strictly before the range start, so a range-restricted fetch would
/// underreport it.
pub fn stock_movement(snapshot: &Snapshot, range: DateRange) -> StockMovementReport {
    let mut rows: Vec<StockMovementRow> = Vec::new();

    for material in snapshot.materials() {
        let movements: Vec<_> = snapshot.movements_of_material(material.id_typed()).collect();
        if movements.is_empty() {
            continue;
        }

        let opening = balance_before(movements.iter().copied(), range.start());
        let (total_in, total_out) = flow_within(movements.iter().copied(), range);
        let closing = opening + total_in - total_out;

        // Weighted-average unit cost over the material's positive-balance lots.
        let (balance_sum, value_sum) = snapshot
            .lots_of(material.id_typed())
            .filter(|l| l.has_balance())
            .fold((0.0, 0.0), |(b, v), lot| {
                (b + lot.balance(), v + lot.value())
            });
        let avg_cost = safe_div(value_sum, balance_sum);

        rows.push(StockMovementRow {
            material_id: material.id_typed(),
            material_name: material.name().to_string(),
            unit: material.unit().to_string(),
            opening,
            total_in,
            total_out,
            closing,
            closing_value: closing * avg_cost,
        });
    }

    rows.sort_by(|a, b| a.material_name.cmp(&b.material_name));

    StockMovementReport { range, rows }
}
