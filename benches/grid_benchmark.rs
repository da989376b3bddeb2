//! Benchmarks for grid resolution, repair and HTML conversion.
//!
//! Run with: cargo bench
//!
//! Tables are synthetic: a regular table with a block of merged cells in every
//! fourth row, and a ragged variant that forces the repair pass to pad rows.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docgrid::render::{table_to_html, HtmlOptions};
use docgrid::{repair_table, resolve_grid, RepairOptions, Table, TableCell, TableRow};

/// Creates a `rows` x `columns` table with a 2x2 merged cell every fourth row.
fn create_spanned_table(rows: usize, columns: usize) -> Table {
    let mut table = Table::new();
    for r in 0..rows {
        let mut cells = Vec::with_capacity(columns);
        let mut c = 0;
        while c < columns {
            if r % 4 == 0 && c % 4 == 0 && c + 1 < columns && r + 1 < rows {
                cells.push(TableCell::text(format!("{}-{}", r, c)).rowspan(2).colspan(2));
                c += 2;
            } else if r % 4 == 1 && c % 4 == 0 && c + 1 < columns {
                // Covered by the merged cell above.
                c += 2;
            } else {
                cells.push(TableCell::text(format!("{}-{}", r, c)));
                c += 1;
            }
        }
        table.add_row(TableRow::new(cells));
    }
    table.with_heading_rows(1)
}

/// Creates a table whose rows get shorter and shorter.
fn create_ragged_table(rows: usize, columns: usize) -> Table {
    Table::from_rows(
        (0..rows)
            .map(|r| {
                let width = columns - (r % columns);
                TableRow::from_strings((0..width).map(|c| format!("{}-{}", r, c)))
            })
            .collect(),
    )
}

/// Benchmark grid resolution at various sizes.
fn bench_grid_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_resolution");

    for size in [10, 50, 100].iter() {
        let table = create_spanned_table(*size, *size / 2);

        group.bench_function(format!("{}_rows", size), |b| {
            b.iter(|| resolve_grid(black_box(&table)));
        });
    }

    group.finish();
}

/// Benchmark the repair pass on valid and malformed tables.
fn bench_repair(c: &mut Criterion) {
    let options = RepairOptions::default();
    let valid = create_spanned_table(50, 20);
    let ragged = create_ragged_table(50, 20);

    c.bench_function("repair_valid_table", |b| {
        b.iter(|| repair_table(black_box(&valid), &options).unwrap());
    });

    c.bench_function("repair_ragged_table", |b| {
        b.iter(|| repair_table(black_box(&ragged), &options).unwrap());
    });
}

/// Benchmark HTML conversion.
fn bench_html(c: &mut Criterion) {
    let table = create_spanned_table(100, 20);
    let options = HtmlOptions::default();

    c.bench_function("table_to_html", |b| {
        b.iter(|| table_to_html(black_box(&table), &options).unwrap());
    });
}

criterion_group!(benches, bench_grid_resolution, bench_repair, bench_html);
criterion_main!(benches);
