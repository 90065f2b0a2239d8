//! Benchmarks the two element-access paths of the array container: the
//! unchecked flat index against checked multi-index access.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use datagrid_core::NdArray;

const ROWS: usize = 512;
const COLS: usize = 512;

fn bench_indexing(c: &mut Criterion) {
    let array = NdArray::<f64>::from_vec(
        &[ROWS as u64, COLS as u64],
        (0..ROWS * COLS).map(|i| i as f64).collect(),
    )
    .unwrap();

    c.bench_function("flat_unchecked_sum", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..ROWS * COLS {
                total += array[black_box(i)];
            }
            black_box(total)
        })
    });

    c.bench_function("two_d_unchecked_sum", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for row in 0..ROWS {
                for col in 0..COLS {
                    total += array[(black_box(row), black_box(col))];
                }
            }
            black_box(total)
        })
    });

    c.bench_function("checked_at_sum", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for row in 0..ROWS as i64 {
                for col in 0..COLS as i64 {
                    total += *array.at(black_box(&[row, col])).unwrap();
                }
            }
            black_box(total)
        })
    });
}

criterion_group!(benches, bench_indexing);
criterion_main!(benches);
