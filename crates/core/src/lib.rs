//! `rxstock-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod num;
pub mod range;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{InvoiceId, LotId, MaterialId, MovementId, SellerId, StoreId};
pub use num::{safe_div, sanitize, sanitize_opt};
pub use range::DateRange;
pub use value_object::ValueObject;
