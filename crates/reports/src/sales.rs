//! Sales-side aggregation: store/product grouping, discounts, commissions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rxstock_core::{MaterialId, SellerId, StoreId};
use rxstock_sales::DiscountKind;
use rxstock_store::SalesSnapshot;

/// Per-store sales summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByStoreRow {
    pub store_id: StoreId,
    pub invoice_count: usize,
    pub gross: f64,
    pub discount: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByStoreReport {
    pub rows: Vec<SalesByStoreRow>,
    pub gross_total: f64,
    pub discount_total: f64,
    pub net_total: f64,
}

/// Per-product sales summary (line grouping across invoices).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByProductRow {
    pub material_id: MaterialId,
    pub description: String,
    pub quantity: f64,
    pub gross: f64,
    pub discount: f64,
    pub net: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByProductReport {
    pub rows: Vec<SalesByProductRow>,
    pub net_total: f64,
}

/// Total discount granted, split by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountSummary {
    pub amount_total: f64,
    pub percent_total: f64,
}

impl DiscountSummary {
    pub fn total(&self) -> f64 {
        self.amount_total + self.percent_total
    }
}

/// Per-seller commission line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRow {
    pub seller_id: SellerId,
    pub seller_name: String,
    pub rate: f64,
    pub net_sales: f64,
    pub commission: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionReport {
    pub rows: Vec<CommissionRow>,
    pub total_commission: f64,
}

impl CommissionReport {
    pub fn row(&self, seller_id: SellerId) -> Option<&CommissionRow> {
        self.rows.iter().find(|r| r.seller_id == seller_id)
    }
}

/// Group confirmed invoices by store.
pub fn sales_by_store(snapshot: &SalesSnapshot) -> SalesByStoreReport {
    let mut by_store: BTreeMap<StoreId, SalesByStoreRow> = BTreeMap::new();

    for invoice in snapshot.reportable_invoices() {
        let row = by_store
            .entry(invoice.store_id)
            .or_insert_with(|| SalesByStoreRow {
                store_id: invoice.store_id,
                invoice_count: 0,
                gross: 0.0,
                discount: 0.0,
                net: 0.0,
            });
        row.invoice_count += 1;
        row.gross += invoice.gross_total();
        row.discount += invoice.discount_total();
        row.net += invoice.net_total();
    }

    let rows: Vec<SalesByStoreRow> = by_store.into_values().collect();
    SalesByStoreReport {
        gross_total: rows.iter().map(|r| r.gross).sum(),
        discount_total: rows.iter().map(|r| r.discount).sum(),
        net_total: rows.iter().map(|r| r.net).sum(),
        rows,
    }
}

/// Group confirmed invoice lines by product.
pub fn sales_by_product(snapshot: &SalesSnapshot) -> SalesByProductReport {
    let mut by_product: BTreeMap<MaterialId, SalesByProductRow> = BTreeMap::new();

    for invoice in snapshot.reportable_invoices() {
        for line in &invoice.lines {
            let row = by_product
                .entry(line.material_id)
                .or_insert_with(|| SalesByProductRow {
                    material_id: line.material_id,
                    description: line.description.clone(),
                    quantity: 0.0,
                    gross: 0.0,
                    discount: 0.0,
                    net: 0.0,
                });
            row.quantity += rxstock_core::sanitize(line.quantity);
            row.gross += line.gross();
            row.discount += line.discount_value();
            row.net += line.net();
        }
    }

    let rows: Vec<SalesByProductRow> = by_product.into_values().collect();
    SalesByProductReport {
        net_total: rows.iter().map(|r| r.net).sum(),
        rows,
    }
}

/// Sum discounts per kind across confirmed invoice lines.
///
/// Exhaustive over `DiscountKind` — adding a kind is a compile error here
/// until it is accounted for.
pub fn discount_summary(snapshot: &SalesSnapshot) -> DiscountSummary {
    let mut summary = DiscountSummary {
        amount_total: 0.0,
        percent_total: 0.0,
    };

    for invoice in snapshot.reportable_invoices() {
        for line in &invoice.lines {
            let value = line.discount_value();
            match line.discount.kind {
                DiscountKind::Amount => summary.amount_total += value,
                DiscountKind::Percent => summary.percent_total += value,
            }
        }
    }

    summary
}

/// Commission per seller over confirmed invoices.
///
/// Invoices whose seller is missing from the seller list are skipped, not
/// fatal; sellers with no sales do not appear.
pub fn commissions(snapshot: &SalesSnapshot) -> CommissionReport {
    let mut net_by_seller: BTreeMap<SellerId, f64> = BTreeMap::new();
    for invoice in snapshot.reportable_invoices() {
        *net_by_seller.entry(invoice.seller_id).or_insert(0.0) += invoice.net_total();
    }

    let mut rows: Vec<CommissionRow> = Vec::new();
    for (seller_id, net_sales) in net_by_seller {
        let Some(seller) = snapshot.seller(seller_id) else {
            tracing::warn!(%seller_id, "invoice references unknown seller; skipping");
            continue;
        };
        rows.push(CommissionRow {
            seller_id,
            seller_name: seller.name().to_string(),
            rate: seller.commission_rate(),
            net_sales,
            commission: seller.commission_on(net_sales),
        });
    }

    CommissionReport {
        total_commission: rows.iter().map(|r| r.commission).sum(),
        rows,
    }
}
