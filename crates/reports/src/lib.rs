//! `rxstock-reports` — pure report aggregators over immutable snapshots.
//!
//! Every aggregator here is a stateless function of its snapshot: same
//! input, same output, no IO, no shared state. Dirty rows degrade to zero
//! contributions instead of failing the whole report.

pub mod consumption;
pub mod csv;
pub mod current_stock;
pub mod movement;
pub mod sales;
pub mod valuation;

pub use consumption::{consumption, ConsumptionReport};
pub use current_stock::{current_stock, CurrentStockReport};
pub use movement::{stock_movement, StockMovementReport};
pub use sales::{
    commissions, discount_summary, sales_by_product, sales_by_store, CommissionReport,
    DiscountSummary, SalesByProductReport, SalesByStoreReport,
};
pub use valuation::{valuation, ValuationReport};
