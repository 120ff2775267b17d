//! Immutable, normalized snapshots of fetched rows.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_catalog::Material;
use rxstock_core::{sanitize, sanitize_opt, LotId, MaterialId, SellerId};
use rxstock_sales::{Invoice, Seller};
use rxstock_stock::{replayed_balance, Lot, Movement};

use crate::row::{LotRow, MaterialRow, MovementRow};

/// A lot whose stored running balance disagrees with its movement log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceMismatch {
    pub lot_id: LotId,
    pub stored: f64,
    pub replayed: f64,
}

/// Normalized stock snapshot: materials, lots, movements, all consistent
/// with each other (orphans dropped, numerics sanitized, movements sorted
/// by business time).
///
/// Snapshots are immutable; aggregators recompute deterministically from
/// one snapshot and concurrent writers only show up on the next fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    materials: Vec<Material>,
    lots: Vec<Lot>,
    movements: Vec<Movement>,
    lot_materials: HashMap<LotId, MaterialId>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Normalize raw backend rows into a consistent snapshot.
    ///
    /// - materials with unusable master data are dropped (warned, not fatal)
    /// - lots referencing unknown materials are dropped
    /// - movements referencing unknown lots are dropped
    /// - nullable numerics coerce to 0
    /// - movements are sorted by `occurred_at` (stable)
    pub fn from_rows(
        material_rows: Vec<MaterialRow>,
        lot_rows: Vec<LotRow>,
        movement_rows: Vec<MovementRow>,
        fetched_at: DateTime<Utc>,
    ) -> Self {
        let mut materials = Vec::with_capacity(material_rows.len());
        for row in material_rows {
            let threshold = sanitize_opt(row.reorder_threshold).max(0.0);
            match Material::new(row.id, row.name, row.kind, row.unit, threshold) {
                Ok(m) => materials.push(m),
                Err(err) => {
                    tracing::warn!(material_id = %row.id, %err, "dropping unusable material row");
                }
            }
        }

        let known: HashSet<MaterialId> = materials.iter().map(|m| m.id_typed()).collect();

        let mut lots = Vec::with_capacity(lot_rows.len());
        let mut lot_materials = HashMap::new();
        for row in lot_rows {
            if !known.contains(&row.material_id) {
                tracing::warn!(lot_id = %row.id, material_id = %row.material_id, "dropping lot with unknown material");
                continue;
            }
            lot_materials.insert(row.id, row.material_id);
            lots.push(Lot::from_stored(
                row.id,
                row.material_id,
                row.lot_number,
                row.received_at,
                row.expiry,
                sanitize_opt(row.unit_cost),
                sanitize_opt(row.balance),
            ));
        }

        let mut movements = Vec::with_capacity(movement_rows.len());
        for row in movement_rows {
            if !lot_materials.contains_key(&row.lot_id) {
                tracing::warn!(movement_id = %row.id, lot_id = %row.lot_id, "dropping movement with unknown lot");
                continue;
            }
            movements.push(Movement {
                id: row.id,
                lot_id: row.lot_id,
                quantity: sanitize_opt(row.quantity),
                kind: row.kind,
                occurred_at: row.occurred_at,
                reference: row.reference,
            });
        }
        movements.sort_by_key(|m| m.occurred_at);

        Self {
            materials,
            lots,
            movements,
            lot_materials,
            fetched_at,
        }
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.iter().find(|m| m.id_typed() == id)
    }

    pub fn lot(&self, id: LotId) -> Option<&Lot> {
        self.lots.iter().find(|l| l.id_typed() == id)
    }

    pub fn lots_of(&self, material_id: MaterialId) -> impl Iterator<Item = &Lot> {
        self.lots
            .iter()
            .filter(move |l| l.material_id() == material_id)
    }

    pub fn movements_of_lot(&self, lot_id: LotId) -> impl Iterator<Item = &Movement> {
        self.movements.iter().filter(move |m| m.lot_id == lot_id)
    }

    pub fn movements_of_material(&self, material_id: MaterialId) -> impl Iterator<Item = &Movement> {
        self.movements.iter().filter(move |m| {
            self.lot_materials.get(&m.lot_id) == Some(&material_id)
        })
    }

    /// Cross-check every lot's stored balance against its movement log.
    ///
    /// A mismatch means an upstream write skipped the log (or vice versa);
    /// reports still run, but the divergence is surfaced for review.
    pub fn verify_balances(&self) -> Vec<BalanceMismatch> {
        const TOLERANCE: f64 = 1e-9;

        let mut mismatches = Vec::new();
        for lot in &self.lots {
            let replayed = replayed_balance(self.movements_of_lot(lot.id_typed()));
            if sanitize(lot.balance() - replayed).abs() > TOLERANCE {
                mismatches.push(BalanceMismatch {
                    lot_id: lot.id_typed(),
                    stored: lot.balance(),
                    replayed,
                });
            }
        }
        mismatches
    }
}

/// Normalized sales snapshot: confirmed invoices joined to sellers.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSnapshot {
    invoices: Vec<Invoice>,
    sellers: Vec<Seller>,
    fetched_at: DateTime<Utc>,
}

impl SalesSnapshot {
    pub fn new(invoices: Vec<Invoice>, sellers: Vec<Seller>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            invoices,
            sellers,
            fetched_at,
        }
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    /// Invoices that count toward reports (confirmed only).
    pub fn reportable_invoices(&self) -> impl Iterator<Item = &Invoice> {
        self.invoices.iter().filter(|i| i.counts_for_reports())
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn seller(&self, id: SellerId) -> Option<&Seller> {
        self.sellers.iter().find(|s| s.id_typed() == id)
    }
}
