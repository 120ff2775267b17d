use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::Utc;
use rxstock_catalog::{MaterialKind, Unit};
use rxstock_core::{LotId, MaterialId};
use rxstock_reports::{current_stock, valuation};
use rxstock_store::{LotRow, MaterialRow, Snapshot};

/// Build a snapshot with `materials` materials × `lots_per_material` lots.
fn build_snapshot(materials: usize, lots_per_material: usize) -> Snapshot {
    let material_rows: Vec<MaterialRow> = (0..materials)
        .map(|i| MaterialRow {
            id: MaterialId::new(),
            name: format!("Material {i:05}"),
            kind: MaterialKind::RawMaterial,
            unit: Unit::Kg,
            reorder_threshold: Some(10.0),
        })
        .collect();

    let lot_rows: Vec<LotRow> = material_rows
        .iter()
        .flat_map(|m| {
            (0..lots_per_material).map(|j| LotRow {
                id: LotId::new(),
                material_id: m.id,
                lot_number: format!("L-{j:03}"),
                received_at: Utc::now(),
                expiry: None,
                unit_cost: Some(1.0 + j as f64 * 0.25),
                balance: Some(10.0 + j as f64),
            })
        })
        .collect();

    Snapshot::from_rows(material_rows, lot_rows, vec![], Utc::now())
}

fn bench_valuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation");

    for materials in [100usize, 1_000] {
        let snapshot = build_snapshot(materials, 4);
        group.throughput(Throughput::Elements(materials as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(materials),
            &snapshot,
            |b, snap| {
                b.iter(|| {
                    let report = valuation(black_box(snap));
                    black_box(report.grand_total)
                })
            },
        );
    }

    group.finish();
}

fn bench_current_stock(c: &mut Criterion) {
    let mut group = c.benchmark_group("current_stock");

    for materials in [100usize, 1_000] {
        let snapshot = build_snapshot(materials, 4);
        group.throughput(Throughput::Elements(materials as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(materials),
            &snapshot,
            |b, snap| {
                b.iter(|| {
                    let report = current_stock(black_box(snap));
                    black_box(report.total_value)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_valuation, bench_current_stock);
criterion_main!(benches);
