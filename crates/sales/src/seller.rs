use serde::{Deserialize, Serialize};

use rxstock_core::{sanitize, DomainError, DomainResult, Entity, SellerId};

/// A commission-earning seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    id: SellerId,
    name: String,
    /// Fraction of net sales, 0.0–1.0.
    commission_rate: f64,
}

impl Seller {
    pub fn new(
        id: SellerId,
        name: impl Into<String>,
        commission_rate: f64,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("seller name cannot be empty"));
        }
        if !commission_rate.is_finite() || !(0.0..=1.0).contains(&commission_rate) {
            return Err(DomainError::validation(
                "commission rate must be within 0.0..=1.0",
            ));
        }
        Ok(Self {
            id,
            name,
            commission_rate,
        })
    }

    pub fn id_typed(&self) -> SellerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commission_rate(&self) -> f64 {
        self.commission_rate
    }

    /// Commission earned on a net sales figure.
    pub fn commission_on(&self, net_sales: f64) -> f64 {
        sanitize(sanitize(net_sales).max(0.0) * self.commission_rate)
    }
}

impl Entity for Seller {
    type Id = SellerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
