//! In-memory backing store for tests, fixtures, and offline development.

use std::sync::RwLock;

use chrono::{DateTime, NaiveDate, Utc};

use rxstock_catalog::Material;
use rxstock_core::{DomainError, DateRange, LotId, MaterialId, MovementId};
use rxstock_sales::{Invoice, Seller};
use rxstock_stock::{ConsumptionReason, Lot, Movement};

use crate::repo::{SalesRepository, StockRepository, StoreError};
use crate::row::{LotRow, MaterialRow, MovementRow};

#[derive(Debug, Default)]
struct Inner {
    materials: Vec<Material>,
    lots: Vec<Lot>,
    movements: Vec<Movement>,
    invoices: Vec<Invoice>,
    sellers: Vec<Seller>,
}

/// In-memory store with the mutation operations the reporting subsystem
/// normally only observes: stock receipt, consumption, compensation.
///
/// Mutations go through the pure decision functions on [`Lot`]; the store
/// appends the resulting movement and folds it into the running balance, so
/// the log and the balances never diverge.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&self, material: Material) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner
            .materials
            .iter()
            .any(|m| m.id_typed() == material.id_typed())
        {
            return Err(DomainError::conflict("material already registered").into());
        }
        inner.materials.push(material);
        Ok(())
    }

    pub fn add_seller(&self, seller: Seller) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        inner.sellers.push(seller);
        Ok(())
    }

    pub fn record_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
        let mut inner = self.write()?;
        if inner.invoices.iter().any(|i| i.number == invoice.number) {
            return Err(DomainError::conflict(format!(
                "invoice {} already recorded",
                invoice.number
            ))
            .into());
        }
        inner.invoices.push(invoice);
        Ok(())
    }

    /// Receive a new lot: registers the lot and its opening movement.
    #[allow(clippy::too_many_arguments)]
    pub fn receive_lot(
        &self,
        material_id: MaterialId,
        lot_number: &str,
        received_at: DateTime<Utc>,
        expiry: Option<NaiveDate>,
        unit_cost: f64,
        quantity: f64,
    ) -> Result<LotId, StoreError> {
        let mut inner = self.write()?;
        if !inner.materials.iter().any(|m| m.id_typed() == material_id) {
            return Err(StoreError::RowNotFound(format!("material {material_id}")));
        }
        if inner
            .lots
            .iter()
            .any(|l| l.material_id() == material_id && l.lot_number() == lot_number)
        {
            return Err(DomainError::conflict(format!(
                "lot number {lot_number} already exists for material"
            ))
            .into());
        }

        let (mut lot, opening) = Lot::open(
            LotId::new(),
            material_id,
            lot_number,
            received_at,
            expiry,
            unit_cost,
            quantity,
        )?;
        lot.apply(&opening);

        tracing::info!(lot_id = %lot.id_typed(), %material_id, quantity, "lot received");
        let id = lot.id_typed();
        inner.lots.push(lot);
        inner.movements.push(opening);
        Ok(id)
    }

    /// Consume stock from a lot for a tagged reason.
    pub fn consume(
        &self,
        lot_id: LotId,
        quantity: f64,
        reason: ConsumptionReason,
        at: DateTime<Utc>,
        reference: Option<String>,
    ) -> Result<MovementId, StoreError> {
        let mut inner = self.write()?;
        let lot = inner
            .lots
            .iter_mut()
            .find(|l| l.id_typed() == lot_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("lot {lot_id}")))?;

        let movement = lot.consume(quantity, reason, at, reference)?;
        lot.apply(&movement);

        tracing::info!(%lot_id, quantity, reason = %reason, "stock consumed");
        let id = movement.id;
        inner.movements.push(movement);
        Ok(id)
    }

    /// Undo a movement by appending its compensation.
    ///
    /// The original row is left untouched; history stays append-only.
    pub fn compensate(
        &self,
        movement_id: MovementId,
        at: DateTime<Utc>,
    ) -> Result<MovementId, StoreError> {
        let mut inner = self.write()?;
        let original = inner
            .movements
            .iter()
            .find(|m| m.id == movement_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("movement {movement_id}")))?
            .clone();

        let compensation = original.compensating(at);
        let lot = inner
            .lots
            .iter_mut()
            .find(|l| l.id_typed() == original.lot_id)
            .ok_or_else(|| StoreError::RowNotFound(format!("lot {}", original.lot_id)))?;
        lot.apply(&compensation);

        tracing::info!(%movement_id, "movement compensated");
        let id = compensation.id;
        inner.movements.push(compensation);
        Ok(id)
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl StockRepository for InMemoryStore {
    fn materials(&self) -> Result<Vec<MaterialRow>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .materials
            .iter()
            .map(|m| MaterialRow {
                id: m.id_typed(),
                name: m.name().to_string(),
                kind: m.kind(),
                unit: m.unit(),
                reorder_threshold: Some(m.reorder_threshold()),
            })
            .collect())
    }

    fn lots(&self) -> Result<Vec<LotRow>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .lots
            .iter()
            .map(|l| LotRow {
                id: l.id_typed(),
                material_id: l.material_id(),
                lot_number: l.lot_number().to_string(),
                received_at: l.received_at(),
                expiry: l.expiry(),
                unit_cost: Some(l.unit_cost()),
                balance: Some(l.balance()),
            })
            .collect())
    }

    fn movements(&self, range: Option<DateRange>) -> Result<Vec<MovementRow>, StoreError> {
        let inner = self.read()?;
        Ok(inner
            .movements
            .iter()
            .filter(|m| range.is_none_or(|r| r.contains(m.occurred_at)))
            .map(|m| MovementRow {
                id: m.id,
                lot_id: m.lot_id,
                quantity: Some(m.quantity),
                kind: m.kind,
                occurred_at: m.occurred_at,
                reference: m.reference.clone(),
            })
            .collect())
    }
}

impl SalesRepository for InMemoryStore {
    fn invoices(&self) -> Result<Vec<Invoice>, StoreError> {
        Ok(self.read()?.invoices.clone())
    }

    fn sellers(&self) -> Result<Vec<Seller>, StoreError> {
        Ok(self.read()?.sellers.clone())
    }
}
