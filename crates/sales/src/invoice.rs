use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rxstock_core::{sanitize, InvoiceId, MaterialId, SellerId, StoreId};

/// Invoice status lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Confirmed,
    Cancelled,
}

/// How a line discount is expressed.
///
/// A tagged kind with exhaustive handling — no loose strings with a default
/// fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// Absolute currency amount off the line gross.
    Amount,
    /// Percentage (0–100) off the line gross.
    Percent,
}

/// A discount applied to one invoice line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    pub kind: DiscountKind,
    pub value: f64,
}

impl Discount {
    pub fn none() -> Self {
        Self {
            kind: DiscountKind::Amount,
            value: 0.0,
        }
    }

    pub fn amount(value: f64) -> Self {
        Self {
            kind: DiscountKind::Amount,
            value: sanitize(value).max(0.0),
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            kind: DiscountKind::Percent,
            value: sanitize(value).clamp(0.0, 100.0),
        }
    }

    /// Currency value of this discount against a line gross.
    ///
    /// Never exceeds the gross; a discount cannot push a line negative.
    pub fn value_against(&self, gross: f64) -> f64 {
        let gross = sanitize(gross).max(0.0);
        let raw = match self.kind {
            DiscountKind::Amount => sanitize(self.value).max(0.0),
            DiscountKind::Percent => gross * sanitize(self.value).clamp(0.0, 100.0) / 100.0,
        };
        raw.min(gross)
    }
}

/// One line of a sales invoice, referencing a finished-goods material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    pub material_id: MaterialId,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount: Discount,
}

impl InvoiceLine {
    pub fn gross(&self) -> f64 {
        sanitize(sanitize(self.quantity) * sanitize(self.unit_price)).max(0.0)
    }

    pub fn discount_value(&self) -> f64 {
        self.discount.value_against(self.gross())
    }

    pub fn net(&self) -> f64 {
        self.gross() - self.discount_value()
    }
}

/// A sales invoice snapshot row.
///
/// Stock deduction happens upstream at confirmation time (it appears in the
/// movement log as consumption referencing the invoice number); here the
/// invoice only feeds sales-side aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub store_id: StoreId,
    pub seller_id: SellerId,
    pub status: InvoiceStatus,
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
}

impl Invoice {
    pub fn gross_total(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::gross).sum()
    }

    pub fn discount_total(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::discount_value).sum()
    }

    pub fn net_total(&self) -> f64 {
        self.lines.iter().map(InvoiceLine::net).sum()
    }

    /// Only confirmed invoices count toward sales reports.
    pub fn counts_for_reports(&self) -> bool {
        self.status == InvoiceStatus::Confirmed
    }
}
