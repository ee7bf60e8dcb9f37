// SPDX-License-Identifier: MPL-2.0
//! Benchmarks for stack layout computation.
//!
//! Measures the performance of:
//! - A full layout pass over typical and deep stacks
//! - The flash-allowance path (widened max-visible)
//! - Exit offset computation

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use toast_stack::domain::group::{Anchor, GroupConfig};
use toast_stack::domain::layout::{self, StackItem};
use toast_stack::NotificationId;

/// Build a mount-ordered item list with mildly varying extents.
fn items(count: usize) -> Vec<StackItem> {
    (0..count)
        .map(|n| StackItem::new(NotificationId::new(format!("toast-{n}")), 40.0 + (n % 5) as f64))
        .collect()
}

/// Benchmark a layout pass at common stack depths.
fn bench_compute_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_layout");
    let config = GroupConfig::default();

    for count in [3, 10, 50] {
        let stack = items(count);
        group.bench_function(format!("compute_stack_{count}"), |b| {
            b.iter(|| {
                black_box(layout::compute_stack(
                    &config,
                    config.max_visible,
                    black_box(&stack),
                ));
            });
        });
    }

    group.finish();
}

/// Benchmark the bottom-anchored variant, which flips every offset sign.
fn bench_bottom_anchor(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_layout");
    let config = GroupConfig::new(Anchor::BottomRight, 15.0, 3);
    let stack = items(10);

    group.bench_function("compute_stack_bottom_10", |b| {
        b.iter(|| {
            black_box(layout::compute_stack(
                &config,
                config.max_visible,
                black_box(&stack),
            ));
        });
    });

    group.finish();
}

/// Benchmark a pass where the visibility cutoff has been widened, the path
/// taken when visible flashes raise the allowance.
fn bench_widened_allowance(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_layout");
    let config = GroupConfig::default();
    let stack = items(10);

    group.bench_function("compute_stack_widened_10", |b| {
        b.iter(|| {
            black_box(layout::compute_stack(
                &config,
                config.max_visible + 4,
                black_box(&stack),
            ));
        });
    });

    group.finish();
}

/// Benchmark the exit offset helper on its own.
fn bench_exit_offset(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_layout");
    let config = GroupConfig::default();

    group.bench_function("exit_offset", |b| {
        b.iter(|| {
            black_box(layout::exit_offset(&config, black_box(42.0)));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_stack,
    bench_bottom_anchor,
    bench_widened_allowance,
    bench_exit_offset
);
criterion_main!(benches);
