//! `rxstock-sales` — invoices, discounts, seller commissions.

pub mod invoice;
pub mod seller;

pub use invoice::{Discount, DiscountKind, Invoice, InvoiceLine, InvoiceStatus};
pub use seller::Seller;
