//! `rxstock-catalog` — material and product master data.

pub mod material;

pub use material::{Material, MaterialKind, Unit};
