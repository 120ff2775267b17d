//! Cached view over the in-memory store.
//!
//! Mirrors the fetch/invalidate cycle of the original dashboard: reads go
//! through the cache, every mutation invalidates the affected side, and the
//! next read recomputes from fresh rows.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use rxstock_catalog::Material;
use rxstock_core::{LotId, MaterialId, MovementId};
use rxstock_sales::{Invoice, Seller};
use rxstock_stock::ConsumptionReason;

use crate::cache::QueryCache;
use crate::memory::InMemoryStore;
use crate::repo::{SalesRepository, StockRepository, StoreError};
use crate::snapshot::{SalesSnapshot, Snapshot};

/// Cache key for stock-side queries.
///
/// Always the full snapshot: the stock movement report replays opening
/// balances from everything before its range, so a range-restricted fetch
/// would underreport them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockQuery {
    Full,
}

/// Cache key for sales-side queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesQuery {
    All,
}

/// In-memory store plus explicit query caches.
pub struct CachedStore {
    store: InMemoryStore,
    stock_cache: QueryCache<StockQuery, Arc<Snapshot>>,
    sales_cache: QueryCache<SalesQuery, Arc<SalesSnapshot>>,
}

impl CachedStore {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            stock_cache: QueryCache::new(),
            sales_cache: QueryCache::new(),
        }
    }

    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Cached full stock snapshot.
    pub fn stock_snapshot(&self) -> Result<Arc<Snapshot>, StoreError> {
        self.stock_cache
            .get_or_insert_with(StockQuery::Full, || self.store.snapshot().map(Arc::new))
    }

    /// Cached sales snapshot.
    pub fn sales_snapshot(&self) -> Result<Arc<SalesSnapshot>, StoreError> {
        self.sales_cache
            .get_or_insert_with(SalesQuery::All, || {
                self.store.sales_snapshot().map(Arc::new)
            })
    }

    // Mutations: delegate, then invalidate the affected cache side.

    pub fn add_material(&self, material: Material) -> Result<(), StoreError> {
        self.store.add_material(material)?;
        self.stock_cache.invalidate_all();
        Ok(())
    }

    pub fn add_seller(&self, seller: Seller) -> Result<(), StoreError> {
        self.store.add_seller(seller)?;
        self.sales_cache.invalidate_all();
        Ok(())
    }

    pub fn record_invoice(&self, invoice: Invoice) -> Result<(), StoreError> {
        self.store.record_invoice(invoice)?;
        self.sales_cache.invalidate_all();
        Ok(())
    }

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
        let id = self.store.receive_lot(
            material_id,
            lot_number,
            received_at,
            expiry,
            unit_cost,
            quantity,
        )?;
        self.stock_cache.invalidate_all();
        Ok(id)
    }

    pub fn consume(
        &self,
        lot_id: LotId,
        quantity: f64,
        reason: ConsumptionReason,
        at: DateTime<Utc>,
        reference: Option<String>,
    ) -> Result<MovementId, StoreError> {
        let id = self.store.consume(lot_id, quantity, reason, at, reference)?;
        self.stock_cache.invalidate_all();
        Ok(id)
    }

    pub fn compensate(
        &self,
        movement_id: MovementId,
        at: DateTime<Utc>,
    ) -> Result<MovementId, StoreError> {
        let id = self.store.compensate(movement_id, at)?;
        self.stock_cache.invalidate_all();
        Ok(id)
    }
}
