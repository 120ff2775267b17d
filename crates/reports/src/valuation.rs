//! Valuation report: weighted-average cost per material, grand total.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{safe_div, MaterialId};
use rxstock_store::Snapshot;

/// Per-material valuation line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRow {
    pub material_id: MaterialId,
    pub material_name: String,
    pub balance: f64,
    /// Σ(balance × cost) / Σ(balance) over positive-balance lots.
    pub weighted_average_cost: f64,
    pub total_value: f64,
}

/// Stock valuation across all materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub as_of: DateTime<Utc>,
    pub rows: Vec<ValuationRow>,
    pub grand_total: f64,
}

impl ValuationReport {
    pub fn row(&self, material_id: MaterialId) -> Option<&ValuationRow> {
        self.rows.iter().find(|r| r.material_id == material_id)
    }

    pub fn to_csv(&self) -> String {
        use crate::csv::{CsvDoc, Field};

        let mut doc = CsvDoc::new(&["material", "balance", "weighted_average_cost", "value"]);
        for row in &self.rows {
            doc.row(&[
                Field::Str(&row.material_name),
                Field::Num(row.balance),
                Field::Num(row.weighted_average_cost),
                Field::Num(row.total_value),
            ]);
        }
        doc.finish()
    }

    pub fn csv_filename(&self) -> String {
        crate::csv::filename("valuation", &self.as_of.format("%Y-%m-%d").to_string())
    }
}

/// Weighted-average valuation over positive-balance lots.
///
/// All lots of a material are blended by remaining balance; consumption
/// order (FIFO or otherwise) does not enter into it.
pub fn valuation(snapshot: &Snapshot) -> ValuationReport {
    let mut rows: Vec<ValuationRow> = Vec::new();

    for material in snapshot.materials() {
        let (balance, value) = snapshot
            .lots_of(material.id_typed())
            .filter(|l| l.has_balance())
            .fold((0.0, 0.0), |(b, v), lot| (b + lot.balance(), v + lot.value()));

        if balance <= 0.0 {
            continue;
        }

        rows.push(ValuationRow {
            material_id: material.id_typed(),
            material_name: material.name().to_string(),
            balance,
            weighted_average_cost: safe_div(value, balance),
            total_value: value,
        });
    }

    rows.sort_by(|a, b| a.material_name.cmp(&b.material_name));

    let grand_total = rows.iter().map(|r| r.total_value).sum();

    ValuationReport {
        as_of: snapshot.fetched_at(),
        rows,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rxstock_catalog::{MaterialKind, Unit};
    use rxstock_core::LotId;
    use rxstock_store::{LotRow, MaterialRow};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, 0, 0, 0).unwrap()
    }

    fn material_row(id: MaterialId, name: &str) -> MaterialRow {
        MaterialRow {
            id,
            name: name.to_string(),
            kind: MaterialKind::RawMaterial,
            unit: Unit::Kg,
            reorder_threshold: Some(0.0),
        }
    }

    fn lot_row(material_id: MaterialId, number: &str, balance: f64, cost: f64) -> LotRow {
        LotRow {
            id: LotId::new(),
            material_id,
            lot_number: number.to_string(),
            received_at: at(1),
            expiry: None,
            unit_cost: Some(cost),
            balance: Some(balance),
        }
    }

    #[test]
    fn paracetamol_example() {
        // Lot A: 10 @ 5, Lot B: 20 @ 8 → avg 7.1666…, value 210.
        let m = MaterialId::new();
        let snap = Snapshot::from_rows(
            vec![material_row(m, "Paracetamol Powder")],
            vec![lot_row(m, "A", 10.0, 5.0), lot_row(m, "B", 20.0, 8.0)],
            vec![],
            at(15),
        );

        let report = valuation(&snap);
        let row = report.row(m).unwrap();
        assert!((row.weighted_average_cost - 7.166_666_666_666_667).abs() < 1e-9);
        assert_eq!(row.total_value, 210.0);
        assert_eq!(report.grand_total, 210.0);
    }

    #[test]
    fn grand_total_equals_row_sum() {
        let m1 = MaterialId::new();
        let m2 = MaterialId::new();
        let snap = Snapshot::from_rows(
            vec![material_row(m1, "A"), material_row(m2, "B")],
            vec![
                lot_row(m1, "A1", 10.0, 5.0),
                lot_row(m2, "B1", 3.0, 2.0),
                lot_row(m2, "B2", 7.0, 1.5),
            ],
            vec![],
            at(15),
        );

        let report = valuation(&snap);
        let sum: f64 = report.rows.iter().map(|r| r.total_value).sum();
        assert!((report.grand_total - sum).abs() < 1e-9);
    }

    #[test]
    fn csv_has_constant_width() {
        let m = MaterialId::new();
        let snap = Snapshot::from_rows(
            vec![material_row(m, "Paracetamol Powder")],
            vec![lot_row(m, "A", 10.0, 5.0)],
            vec![],
            at(15),
        );

        let out = valuation(&snap).to_csv();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let cols = lines[0].split(',').count();
        assert!(lines.iter().all(|l| l.split(',').count() == cols));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_lots() -> impl Strategy<Value = Vec<(f64, f64)>> {
            proptest::collection::vec(
                (0.01f64..1_000.0, 0.0f64..500.0),
                1..6,
            )
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: grand total is invariant under permutation of the
            /// material input order (within floating-point tolerance).
            #[test]
            fn grand_total_is_permutation_invariant(
                per_material in proptest::collection::vec(arb_lots(), 1..8),
                seed in any::<u64>(),
            ) {
                let materials: Vec<MaterialRow> = per_material
                    .iter()
                    .enumerate()
                    .map(|(i, _)| material_row(MaterialId::new(), &format!("M{i:02}")))
                    .collect();
                let lots: Vec<LotRow> = materials
                    .iter()
                    .zip(&per_material)
                    .flat_map(|(m, lots)| {
                        lots.iter().enumerate().map(|(j, (balance, cost))| {
                            lot_row(m.id, &format!("L{j}"), *balance, *cost)
                        })
                    })
                    .collect();

                let forward = Snapshot::from_rows(
                    materials.clone(),
                    lots.clone(),
                    vec![],
                    at(15),
                );

                // Deterministic shuffle driven by the seed.
                let mut shuffled_materials = materials;
                let mut shuffled_lots = lots;
                let mut state = seed | 1;
                let mut next = || {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    state
                };
                for i in (1..shuffled_materials.len()).rev() {
                    let j = (next() as usize) % (i + 1);
                    shuffled_materials.swap(i, j);
                }
                for i in (1..shuffled_lots.len()).rev() {
                    let j = (next() as usize) % (i + 1);
                    shuffled_lots.swap(i, j);
                }
                let shuffled = Snapshot::from_rows(shuffled_materials, shuffled_lots, vec![], at(15));

                let a = valuation(&forward).grand_total;
                let b = valuation(&shuffled).grand_total;
                prop_assert!((a - b).abs() < 1e-6 * a.abs().max(1.0));
            }
        }
    }
}
