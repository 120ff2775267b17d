//! Balance reconstruction by replaying the movement log.
//!
//! Closed-interval semantics throughout: a movement stamped exactly at the
//! range start or end belongs to the range; the opening balance replays
//! only movements strictly before the start.

use chrono::{DateTime, Utc};

use rxstock_core::{sanitize, DateRange};

use crate::movement::Movement;

/// Balance immediately before `at`: signed sum of movements with
/// `occurred_at` strictly earlier.
pub fn balance_before<'a>(
    movements: impl IntoIterator<Item = &'a Movement>,
    at: DateTime<Utc>,
) -> f64 {
    movements
        .into_iter()
        .filter(|m| m.occurred_at < at)
        .map(|m| sanitize(m.quantity))
        .sum()
}

/// In/out flow within a closed range.
///
/// Returns `(total_in, total_out)`; `total_out` is reported as a positive
/// magnitude.
pub fn flow_within<'a>(
    movements: impl IntoIterator<Item = &'a Movement>,
    range: DateRange,
) -> (f64, f64) {
    let mut total_in = 0.0;
    let mut total_out = 0.0;
    for m in movements {
        if !range.contains(m.occurred_at) {
            continue;
        }
        let q = sanitize(m.quantity);
        if q > 0.0 {
            total_in += q;
        } else {
            total_out += -q;
        }
    }
    (total_in, total_out)
}

/// Full replay: signed sum of every movement (the lot's expected running
/// balance). Used to cross-check stored balances against the log.
pub fn replayed_balance<'a>(movements: impl IntoIterator<Item = &'a Movement>) -> f64 {
    movements.into_iter().map(|m| sanitize(m.quantity)).sum()
}
