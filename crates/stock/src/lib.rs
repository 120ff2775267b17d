//! `rxstock-stock` — lot-tracked inventory: lots, movements, balance replay.
//!
//! The movement log is append-only. Corrections are expressed as
//! compensating movements; historical rows are never edited in place.

pub mod lot;
pub mod movement;
pub mod replay;

pub use lot::Lot;
pub use movement::{ConsumptionReason, Movement, MovementKind};
pub use replay::{balance_before, flow_within, replayed_balance};
