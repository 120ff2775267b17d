use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{sanitize, LotId, MovementId};

/// Why stock left a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionReason {
    Production,
    Sample,
    Waste,
    TransferOut,
}

impl ConsumptionReason {
    pub const ALL: [ConsumptionReason; 4] = [
        ConsumptionReason::Production,
        ConsumptionReason::Sample,
        ConsumptionReason::Waste,
        ConsumptionReason::TransferOut,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsumptionReason::Production => "production",
            ConsumptionReason::Sample => "sample",
            ConsumptionReason::Waste => "waste",
            ConsumptionReason::TransferOut => "transfer_out",
        }
    }
}

impl core::fmt::Display for ConsumptionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a movement.
///
/// The signed quantity carries the direction; the kind carries the business
/// meaning. Opening and receipt movements are positive, consumption is
/// negative, adjustments may be either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Initial balance recorded when the lot was first received.
    Opening,
    /// Additional stock received into an existing lot.
    Receipt,
    /// Stock leaving the lot for a tagged reason.
    Consumption(ConsumptionReason),
    /// Manual correction (stocktake, breakage found late, compensation).
    Adjustment,
}

/// A single signed quantity change against a lot.
///
/// Movements are immutable facts. A wrong movement is undone by appending
/// its compensation, never by editing the original row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub lot_id: LotId,
    /// Positive = into the lot, negative = out of the lot.
    pub quantity: f64,
    pub kind: MovementKind,
    pub occurred_at: DateTime<Utc>,
    /// Upstream document reference (invoice number, adjustment slip).
    pub reference: Option<String>,
}

impl Movement {
    pub fn new(
        lot_id: LotId,
        quantity: f64,
        kind: MovementKind,
        occurred_at: DateTime<Utc>,
        reference: Option<String>,
    ) -> Self {
        Self {
            id: MovementId::new(),
            lot_id,
            quantity: sanitize(quantity),
            kind,
            occurred_at,
            reference,
        }
    }

    pub fn is_inflow(&self) -> bool {
        self.quantity > 0.0
    }

    pub fn is_outflow(&self) -> bool {
        self.quantity < 0.0
    }

    /// The reason tag, when this is a consumption movement.
    pub fn consumption_reason(&self) -> Option<ConsumptionReason> {
        match self.kind {
            MovementKind::Consumption(reason) => Some(reason),
            _ => None,
        }
    }

    /// Build the movement that cancels this one.
    ///
    /// The compensation is an adjustment with the opposite sign, stamped at
    /// `at` (not backdated), referencing the original movement id.
    pub fn compensating(&self, at: DateTime<Utc>) -> Movement {
        Movement::new(
            self.lot_id,
            -self.quantity,
            MovementKind::Adjustment,
            at,
            Some(format!("compensates {}", self.id)),
        )
    }
}
