//! Consumption report: outgoing stock by material and reason over a range.

use serde::{Deserialize, Serialize};

use rxstock_core::{sanitize, DateRange, MaterialId};
use rxstock_stock::ConsumptionReason;
use rxstock_store::Snapshot;

/// Quantity/value pair for one reason tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonBreakdown {
    pub reason: ConsumptionReason,
    pub quantity: f64,
    pub value: f64,
}

/// Per-material consumption over the range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRow {
    pub material_id: MaterialId,
    pub material_name: String,
    pub unit: String,
    pub total_quantity: f64,
    /// Quantity × the consuming lot's own unit cost.
    pub total_value: f64,
    /// Non-zero reasons only, in `ConsumptionReason::ALL` order.
    pub reasons: Vec<ReasonBreakdown>,
}

/// Consumption across all materials for one range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionReport {
    pub range: DateRange,
    pub rows: Vec<ConsumptionRow>,
    pub total_quantity: f64,
    pub total_value: f64,
    /// Global totals per reason; each equals the sum over material rows.
    pub reason_totals: Vec<ReasonBreakdown>,
}

impl ConsumptionReport {
    pub fn row(&self, material_id: MaterialId) -> Option<&ConsumptionRow> {
        self.rows.iter().find(|r| r.material_id == material_id)
    }

    pub fn reason_total(&self, reason: ConsumptionReason) -> Option<&ReasonBreakdown> {
        self.reason_totals.iter().find(|r| r.reason == reason)
    }

    pub fn to_csv(&self) -> String {
        use crate::csv::{CsvDoc, Field};

        let mut doc = CsvDoc::new(&["material", "unit", "reason", "quantity", "value"]);
        for row in &self.rows {
            for breakdown in &row.reasons {
                doc.row(&[
                    Field::Str(&row.material_name),
                    Field::Str(&row.unit),
                    Field::Str(breakdown.reason.as_str()),
                    Field::Num(breakdown.quantity),
                    Field::Num(breakdown.value),
                ]);
            }
        }
        doc.finish()
    }

    pub fn csv_filename(&self) -> String {
        crate::csv::filename("consumption", &self.range.slug())
    }
}

/// Group consumption movements by material and reason.
///
/// Only movements tagged `Consumption(_)` count; negative adjustments are
/// corrections, not consumption. Value is priced at the consuming lot's
/// unit cost.
pub fn consumption(snapshot: &Snapshot, range: DateRange) -> ConsumptionReport {
    let mut rows: Vec<ConsumptionRow> = Vec::new();

    for material in snapshot.materials() {
        // (quantity, value) accumulators indexed like ConsumptionReason::ALL.
        let mut by_reason = [(0.0f64, 0.0f64); ConsumptionReason::ALL.len()];

        for movement in snapshot.movements_of_material(material.id_typed()) {
            let Some(reason) = movement.consumption_reason() else {
                continue;
            };
            if !movement.is_outflow() || !range.contains(movement.occurred_at) {
                continue;
            }

            let quantity = sanitize(-movement.quantity);
            let unit_cost = snapshot
                .lot(movement.lot_id)
                .map(|l| l.unit_cost())
                .unwrap_or(0.0);
            let slot = ConsumptionReason::ALL
                .iter()
                .position(|r| *r == reason)
                .unwrap_or(0);
            by_reason[slot].0 += quantity;
            by_reason[slot].1 += sanitize(quantity * unit_cost);
        }

        let reasons: Vec<ReasonBreakdown> = ConsumptionReason::ALL
            .iter()
            .zip(by_reason)
            .filter(|(_, (q, _))| *q > 0.0)
            .map(|(reason, (quantity, value))| ReasonBreakdown {
                reason: *reason,
                quantity,
                value,
            })
            .collect();

        if reasons.is_empty() {
            continue;
        }

        rows.push(ConsumptionRow {
            material_id: material.id_typed(),
            material_name: material.name().to_string(),
            unit: material.unit().to_string(),
            total_quantity: reasons.iter().map(|r| r.quantity).sum(),
            total_value: reasons.iter().map(|r| r.value).sum(),
            reasons,
        });
    }

    rows.sort_by(|a, b| a.material_name.cmp(&b.material_name));

    let reason_totals: Vec<ReasonBreakdown> = ConsumptionReason::ALL
        .iter()
        .map(|reason| {
            let (quantity, value) = rows
                .iter()
                .flat_map(|row| &row.reasons)
                .filter(|b| b.reason == *reason)
                .fold((0.0, 0.0), |(q, v), b| (q + b.quantity, v + b.value));
            ReasonBreakdown {
                reason: *reason,
                quantity,
                value,
            }
        })
        .filter(|b| b.quantity > 0.0)
        .collect();

    ConsumptionReport {
        range,
        total_quantity: rows.iter().map(|r| r.total_quantity).sum(),
        total_value: rows.iter().map(|r| r.total_value).sum(),
        reason_totals,
        rows,
    }
}
