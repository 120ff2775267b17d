//! `rxstock-store` — repository boundary, immutable snapshots, query cache.
//!
//! The backend is treated as a row source: the repository returns raw rows
//! (nullable numerics and all), `Snapshot::from_rows` normalizes them into
//! domain types, and the aggregators in `rxstock-reports` only ever see the
//! normalized snapshot. Caching is an explicit object with explicit
//! invalidation, not ambient state.

pub mod cache;
pub mod cached;
pub mod fixture;
pub mod memory;
pub mod repo;
pub mod row;
pub mod snapshot;

pub use cache::QueryCache;
pub use cached::{CachedStore, SalesQuery, StockQuery};
pub use memory::InMemoryStore;
pub use repo::{SalesRepository, StockRepository, StoreError};
pub use row::{LotRow, MaterialRow, MovementRow};
pub use snapshot::{BalanceMismatch, SalesSnapshot, Snapshot};
