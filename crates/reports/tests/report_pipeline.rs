//! End-to-end pipeline: mutate store → cached snapshot → reports → CSV.

use chrono::{DateTime, TimeZone, Utc};

use rxstock_catalog::{Material, MaterialKind, Unit};
use rxstock_core::{DateRange, MaterialId, SellerId, StoreId};
use rxstock_reports::{
    commissions, consumption, current_stock, discount_summary, sales_by_store, stock_movement,
    valuation,
};
use rxstock_sales::{Discount, Invoice, InvoiceLine, InvoiceStatus, Seller};
use rxstock_stock::ConsumptionReason;
use rxstock_store::{CachedStore, InMemoryStore};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, d, 12, 0, 0).unwrap()
}

struct Fixture {
    store: CachedStore,
    paracetamol: MaterialId,
    lactose: MaterialId,
    seller: SellerId,
}

fn build_fixture() -> Fixture {
    rxstock_observability::init();

    let store = CachedStore::new(InMemoryStore::new());
    let paracetamol = MaterialId::new();
    let lactose = MaterialId::new();
    let seller = SellerId::new();

    store
        .add_material(
            Material::new(
                paracetamol,
                "Paracetamol Powder",
                MaterialKind::RawMaterial,
                Unit::Kg,
                15.0,
            )
            .unwrap(),
        )
        .unwrap();
    store
        .add_material(
            Material::new(lactose, "Lactose", MaterialKind::RawMaterial, Unit::Kg, 5.0).unwrap(),
        )
        .unwrap();
    store
        .add_seller(Seller::new(seller, "A. Rahimi", 0.05).unwrap())
        .unwrap();

    // Paracetamol: two lots at different costs, then production + sample use.
    let lot_a = store
        .receive_lot(paracetamol, "PA-26-01", day(2), None, 5.0, 30.0)
        .unwrap();
    store
        .receive_lot(paracetamol, "PA-26-02", day(4), None, 8.0, 20.0)
        .unwrap();
    store
        .consume(lot_a, 20.0, ConsumptionReason::Production, day(10), None)
        .unwrap();
    store
        .consume(
            lot_a,
            2.0,
            ConsumptionReason::Sample,
            day(12),
            Some("INV-100".to_string()),
        )
        .unwrap();

    // Lactose: one lot, some waste.
    let lot_l = store
        .receive_lot(lactose, "LA-26-01", day(3), None, 2.0, 40.0)
        .unwrap();
    store
        .consume(lot_l, 4.0, ConsumptionReason::Waste, day(11), None)
        .unwrap();

    store
        .record_invoice(Invoice {
            id: rxstock_core::InvoiceId::new(),
            number: "INV-100".to_string(),
            store_id: StoreId::new(),
            seller_id: seller,
            status: InvoiceStatus::Confirmed,
            issued_at: day(12),
            lines: vec![InvoiceLine {
                material_id: paracetamol,
                description: "Paracetamol 500mg".to_string(),
                quantity: 100.0,
                unit_price: 1.2,
                discount: Discount::percent(5.0),
            }],
        })
        .unwrap();

    Fixture {
        store,
        paracetamol,
        lactose,
        seller,
    }
}

#[test]
fn movement_closing_matches_current_stock() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();

    // [first receipt, now]: closing must reproduce the live balance.
    let range = DateRange::until_now(day(1));
    let movement = stock_movement(&snapshot, range);
    let current = current_stock(&snapshot);

    for material in [fx.paracetamol, fx.lactose] {
        let closing = movement.row(material).unwrap().closing;
        let balance = current.row(material).unwrap().total_balance;
        assert!(
            (closing - balance).abs() < 1e-9,
            "closing {closing} != balance {balance}"
        );
    }
}

#[test]
fn snapshot_balances_match_movement_log() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();
    assert!(snapshot.verify_balances().is_empty());
}

#[test]
fn valuation_and_current_stock_agree() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();

    let val = valuation(&snapshot);
    let current = current_stock(&snapshot);

    // Paracetamol: lot A 8 @ 5 + lot B 20 @ 8 = 200; lactose: 36 @ 2 = 72.
    assert!((val.grand_total - 272.0).abs() < 1e-9);
    assert!((val.grand_total - current.total_value).abs() < 1e-9);

    let para = val.row(fx.paracetamol).unwrap();
    assert!((para.weighted_average_cost - 200.0 / 28.0).abs() < 1e-9);
}

#[test]
fn consumption_reasons_are_priced_at_lot_cost() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();

    let report = consumption(&snapshot, DateRange::new(day(1), day(31)).unwrap());

    // All paracetamol consumption came from lot A (cost 5).
    let para = report.row(fx.paracetamol).unwrap();
    assert_eq!(para.total_quantity, 22.0);
    assert_eq!(para.total_value, 110.0);

    let sample = report.reason_total(ConsumptionReason::Sample).unwrap();
    assert_eq!(sample.quantity, 2.0);
    assert_eq!(sample.value, 10.0);

    let total_from_rows: f64 = report.rows.iter().map(|r| r.total_value).sum();
    assert!((report.total_value - total_from_rows).abs() < 1e-9);
}

#[test]
fn mutation_invalidates_cached_reports() {
    let fx = build_fixture();
    let before = current_stock(&fx.store.stock_snapshot().unwrap());

    let lot_b = fx
        .store
        .stock_snapshot()
        .unwrap()
        .lots()
        .iter()
        .find(|l| l.lot_number() == "PA-26-02")
        .unwrap()
        .id_typed();
    fx.store
        .consume(lot_b, 5.0, ConsumptionReason::Production, day(20), None)
        .unwrap();

    let after = current_stock(&fx.store.stock_snapshot().unwrap());
    let delta = before.row(fx.paracetamol).unwrap().total_balance
        - after.row(fx.paracetamol).unwrap().total_balance;
    assert!((delta - 5.0).abs() < 1e-9);
}

#[test]
fn sales_reports_tie_out() {
    let fx = build_fixture();
    let sales = fx.store.sales_snapshot().unwrap();

    let by_store = sales_by_store(&sales);
    assert_eq!(by_store.rows.len(), 1);
    // 100 × 1.2 = 120 gross, 5% discount = 6.
    assert!((by_store.gross_total - 120.0).abs() < 1e-9);
    assert!((by_store.net_total - 114.0).abs() < 1e-9);

    let discounts = discount_summary(&sales);
    assert!((discounts.percent_total - 6.0).abs() < 1e-9);
    assert_eq!(discounts.amount_total, 0.0);

    let comm = commissions(&sales);
    let row = comm.row(fx.seller).unwrap();
    assert!((row.commission - 114.0 * 0.05).abs() < 1e-9);
}

#[test]
fn every_report_exports_csv_with_header_and_rows() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();
    let range = DateRange::new(day(1), day(31)).unwrap();

    let current = current_stock(&snapshot);
    let movement = stock_movement(&snapshot, range);
    let val = valuation(&snapshot);
    let cons = consumption(&snapshot, range);

    assert_eq!(current.to_csv().lines().count(), current.rows.len() + 1);
    assert_eq!(movement.to_csv().lines().count(), movement.rows.len() + 1);
    assert_eq!(val.to_csv().lines().count(), val.rows.len() + 1);

    let reason_lines: usize = cons.rows.iter().map(|r| r.reasons.len()).sum();
    assert_eq!(cons.to_csv().lines().count(), reason_lines + 1);

    assert_eq!(movement.csv_filename(), "stock-movement-2026-01-01_2026-01-31.csv");
}

#[test]
fn rerunning_aggregators_is_deterministic() {
    let fx = build_fixture();
    let snapshot = fx.store.stock_snapshot().unwrap();
    let range = DateRange::new(day(1), day(31)).unwrap();

    assert_eq!(current_stock(&snapshot), current_stock(&snapshot));
    assert_eq!(valuation(&snapshot), valuation(&snapshot));
    assert_eq!(
        stock_movement(&snapshot, range),
        stock_movement(&snapshot, range)
    );
    assert_eq!(consumption(&snapshot, range), consumption(&snapshot, range));
}
