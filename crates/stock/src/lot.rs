use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{sanitize, DomainError, DomainResult, Entity, LotId, MaterialId};

use crate::movement::{ConsumptionReason, Movement, MovementKind};

/// A received quantity of a material at a specific unit cost.
///
/// Lots are the valuation unit: each lot remembers its own unit cost and
/// its running balance, and valuation weights balances by per-lot cost
/// (weighted average across lots, not FIFO).
///
/// State transitions follow the decide/apply split: `receive`/`consume`
/// return the `Movement` describing what happened without mutating the lot;
/// `apply` folds a movement into the running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    id: LotId,
    material_id: MaterialId,
    lot_number: String,
    received_at: DateTime<Utc>,
    expiry: Option<NaiveDate>,
    /// Cost per stocking unit, fixed at receipt.
    unit_cost: f64,
    /// Running balance: opening quantity plus the signed sum of movements.
    balance: f64,
}

impl Lot {
    /// Open a new lot with its opening movement.
    #[allow(clippy::too_many_arguments)]
    pub fn open(
        id: LotId,
        material_id: MaterialId,
        lot_number: impl Into<String>,
        received_at: DateTime<Utc>,
        expiry: Option<NaiveDate>,
        unit_cost: f64,
        opening_quantity: f64,
    ) -> DomainResult<(Self, Movement)> {
        let lot_number = lot_number.into();
        if lot_number.trim().is_empty() {
            return Err(DomainError::validation("lot number cannot be empty"));
        }
        if !unit_cost.is_finite() || unit_cost < 0.0 {
            return Err(DomainError::validation(
                "unit cost must be a non-negative number",
            ));
        }
        if !opening_quantity.is_finite() || opening_quantity <= 0.0 {
            return Err(DomainError::validation(
                "opening quantity must be positive",
            ));
        }

        let lot = Self {
            id,
            material_id,
            lot_number,
            received_at,
            expiry,
            unit_cost,
            balance: 0.0,
        };
        let opening = Movement::new(
            id,
            opening_quantity,
            MovementKind::Opening,
            received_at,
            None,
        );
        Ok((lot, opening))
    }

    /// Rehydrate a lot from already-stored fields (repository path).
    ///
    /// Numeric columns are sanitized rather than rejected: a dirty stored
    /// balance degrades to zero contribution.
    pub fn from_stored(
        id: LotId,
        material_id: MaterialId,
        lot_number: impl Into<String>,
        received_at: DateTime<Utc>,
        expiry: Option<NaiveDate>,
        unit_cost: f64,
        balance: f64,
    ) -> Self {
        Self {
            id,
            material_id,
            lot_number: lot_number.into(),
            received_at,
            expiry,
            unit_cost: sanitize(unit_cost).max(0.0),
            balance: sanitize(balance),
        }
    }

    pub fn id_typed(&self) -> LotId {
        self.id
    }

    pub fn material_id(&self) -> MaterialId {
        self.material_id
    }

    pub fn lot_number(&self) -> &str {
        &self.lot_number
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry
    }

    pub fn unit_cost(&self) -> f64 {
        self.unit_cost
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn has_balance(&self) -> bool {
        self.balance > 0.0
    }

    /// Remaining value at this lot's own cost.
    pub fn value(&self) -> f64 {
        sanitize(self.balance * self.unit_cost)
    }

    pub fn is_expired_on(&self, date: NaiveDate) -> bool {
        self.expiry.is_some_and(|e| e < date)
    }

    /// Decide: additional stock received into this lot.
    pub fn receive(
        &self,
        quantity: f64,
        at: DateTime<Utc>,
        reference: Option<String>,
    ) -> DomainResult<Movement> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation("receipt quantity must be positive"));
        }
        Ok(Movement::new(
            self.id,
            quantity,
            MovementKind::Receipt,
            at,
            reference,
        ))
    }

    /// Decide: stock leaving this lot for a tagged reason.
    pub fn consume(
        &self,
        quantity: f64,
        reason: ConsumptionReason,
        at: DateTime<Utc>,
        reference: Option<String>,
    ) -> DomainResult<Movement> {
        if !quantity.is_finite() || quantity <= 0.0 {
            return Err(DomainError::validation(
                "consumption quantity must be positive",
            ));
        }
        if quantity > self.balance {
            return Err(DomainError::invariant(format!(
                "lot {} holds {}, cannot consume {}",
                self.lot_number, self.balance, quantity
            )));
        }
        Ok(Movement::new(
            self.id,
            -quantity,
            MovementKind::Consumption(reason),
            at,
            reference,
        ))
    }

    /// Apply: fold a movement into the running balance.
    pub fn apply(&mut self, movement: &Movement) {
        debug_assert_eq!(movement.lot_id, self.id);
        self.balance = sanitize(self.balance + movement.quantity);
    }
}

impl Entity for Lot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn open_lot(qty: f64, cost: f64) -> (Lot, Movement) {
        Lot::open(
            LotId::new(),
            MaterialId::new(),
            "B-2026-001",
            Utc.with_ymd_and_hms(2026, 1, 10, 8, 0, 0).unwrap(),
            None,
            cost,
            qty,
        )
        .unwrap()
    }

    #[test]
    fn open_then_apply_sets_balance() {
        let (mut lot, opening) = open_lot(50.0, 4.0);
        assert_eq!(lot.balance(), 0.0);
        lot.apply(&opening);
        assert_eq!(lot.balance(), 50.0);
        assert_eq!(lot.value(), 200.0);
    }

    #[test]
    fn cannot_consume_more_than_balance() {
        let (mut lot, opening) = open_lot(10.0, 4.0);
        lot.apply(&opening);
        let err = lot
            .consume(10.5, ConsumptionReason::Production, Utc::now(), None)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn consume_and_compensate_round_trip() {
        let (mut lot, opening) = open_lot(30.0, 2.0);
        lot.apply(&opening);

        let out = lot
            .consume(12.0, ConsumptionReason::Sample, Utc::now(), None)
            .unwrap();
        lot.apply(&out);
        assert_eq!(lot.balance(), 18.0);

        let undo = out.compensating(Utc::now());
        lot.apply(&undo);
        assert_eq!(lot.balance(), 30.0);
    }

    #[test]
    fn rejects_zero_and_negative_quantities() {
        let (mut lot, opening) = open_lot(10.0, 1.0);
        lot.apply(&opening);
        assert!(lot.receive(0.0, Utc::now(), None).is_err());
        assert!(lot
            .consume(-3.0, ConsumptionReason::Waste, Utc::now(), None)
            .is_err());
    }

    #[test]
    fn expiry_check_is_strict() {
        let expiry = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
        let (lot, _) = Lot::open(
            LotId::new(),
            MaterialId::new(),
            "B-2026-002",
            Utc::now(),
            Some(expiry),
            1.0,
            5.0,
        )
        .unwrap();
        assert!(!lot.is_expired_on(expiry));
        assert!(lot.is_expired_on(expiry.succ_opt().unwrap()));
    }
}
