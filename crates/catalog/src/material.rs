use serde::{Deserialize, Serialize};

use rxstock_core::{DomainError, DomainResult, Entity, MaterialId};

/// What a material is used for in the distribution flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Active ingredient or excipient consumed by production.
    RawMaterial,
    /// Bottles, blisters, cartons, labels.
    Packaging,
    /// Finished goods kept in the same lot-tracked store.
    Finished,
}

/// Stocking unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    L,
    Ml,
    Piece,
    Box,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Piece => "piece",
            Unit::Box => "box",
        }
    }
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Master-data record for a lot-tracked material.
///
/// Materials are reference data: lots and movements point at them, reports
/// group by them. The reorder threshold drives the low-stock flag in the
/// current stock report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    id: MaterialId,
    name: String,
    kind: MaterialKind,
    unit: Unit,
    /// Total balance below this mark raises the low-stock flag.
    reorder_threshold: f64,
}

impl Material {
    pub fn new(
        id: MaterialId,
        name: impl Into<String>,
        kind: MaterialKind,
        unit: Unit,
        reorder_threshold: f64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("material name cannot be empty"));
        }
        if !reorder_threshold.is_finite() || reorder_threshold < 0.0 {
            return Err(DomainError::validation(
                "reorder threshold must be a non-negative number",
            ));
        }
        Ok(Self {
            id,
            name,
            kind,
            unit,
            reorder_threshold,
        })
    }

    pub fn id_typed(&self) -> MaterialId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MaterialKind {
        self.kind
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn reorder_threshold(&self) -> f64 {
        self.reorder_threshold
    }

    /// Low-stock check against a computed total balance.
    pub fn is_below_threshold(&self, total_balance: f64) -> bool {
        total_balance < self.reorder_threshold
    }
}

impl Entity for Material {
    type Id = MaterialId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
