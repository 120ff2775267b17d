//! Repository boundary toward the hosted backend.

use chrono::Utc;
use thiserror::Error;

use rxstock_core::DateRange;
use rxstock_sales::{Invoice, Seller};

use crate::row::{LotRow, MaterialRow, MovementRow};
use crate::snapshot::{SalesSnapshot, Snapshot};

/// Failure at the fetch boundary.
///
/// Aggregators themselves are infallible; everything that can go wrong
/// lives here or in domain mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend unreachable or returned a transport-level failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A referenced row does not exist.
    #[error("row not found: {0}")]
    RowNotFound(String),

    /// Domain rule rejected a mutation.
    #[error(transparent)]
    Domain(#[from] rxstock_core::DomainError),
}

/// Row-fetch interface for the stock side.
///
/// Implementations return raw rows; normalization into a [`Snapshot`]
/// happens on this trait's default `snapshot` method so every caller gets
/// the same orphan-dropping and numeric coercion.
pub trait StockRepository: Send + Sync {
    fn materials(&self) -> Result<Vec<MaterialRow>, StoreError>;

    fn lots(&self) -> Result<Vec<LotRow>, StoreError>;

    /// Movements, optionally restricted to a closed date range.
    fn movements(&self, range: Option<DateRange>) -> Result<Vec<MovementRow>, StoreError>;

    /// Fetch everything and normalize into an immutable snapshot.
    fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let materials = self.materials()?;
        let lots = self.lots()?;
        let movements = self.movements(None)?;
        Ok(Snapshot::from_rows(materials, lots, movements, Utc::now()))
    }
}

/// Row-fetch interface for the sales side.
pub trait SalesRepository: Send + Sync {
    fn invoices(&self) -> Result<Vec<Invoice>, StoreError>;

    fn sellers(&self) -> Result<Vec<Seller>, StoreError>;

    fn sales_snapshot(&self) -> Result<SalesSnapshot, StoreError> {
        let invoices = self.invoices()?;
        let sellers = self.sellers()?;
        Ok(SalesSnapshot::new(invoices, sellers, Utc::now()))
    }
}
