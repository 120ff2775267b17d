//! Value object trait: equality by value, not identity.
//!
//! Value objects are defined entirely by their attribute values; two value
//! objects with the same values are considered equal. They are immutable —
//! "modifying" one means constructing a new one.

/// Marker trait for value objects.
///
/// Example: `DateRange { start, end }` is a value object; `Material` with a
/// `MaterialId` is an entity.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
