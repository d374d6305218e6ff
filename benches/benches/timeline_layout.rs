// Copyright 2025 the Tidemark Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for full timeline layout passes.
//!
//! Uses deterministic synthetic event sets: a sparse spread where every
//! event gets its own half-column, and dense clusters that exercise the
//! grouper's merge path and the overflow machinery. A warm pass threads
//! the previous frame back in to measure the stability tracker on top.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tidemark_layout::{Event, LayoutOptions, Viewport, layout};
use tidemark_scale::{TimeStamp, TimeWindow};

fn viewport() -> Viewport {
    Viewport {
        pixel_width: 1600.0,
        pixel_height: 1000.0,
        axis_y: 500.0,
        margin_x: 40.0,
        margin_y: 50.0,
        card_width: 160.0,
        card_full_height: 140.0,
        card_compact_height: 64.0,
        card_title_height: 28.0,
    }
}

fn sparse_events(count: usize) -> Vec<Event> {
    (0..count)
        .map(|i| {
            Event::new(
                format!("sparse-{i}"),
                TimeStamp::from_days(i as f64 * 30.0),
                format!("Event {i}"),
            )
        })
        .collect()
}

fn clustered_events(clusters: usize, per_cluster: usize) -> Vec<Event> {
    let mut events = Vec::with_capacity(clusters * per_cluster);
    for c in 0..clusters {
        for i in 0..per_cluster {
            events.push(Event::new(
                format!("c{c}-{i}"),
                TimeStamp::from_days(c as f64 * 200.0 + i as f64 * 0.1),
                format!("Cluster {c} event {i}"),
            ));
        }
    }
    events
}

fn bench_layout(c: &mut Criterion) {
    let viewport = viewport();
    let options = LayoutOptions::default();

    let sparse = sparse_events(200);
    let sparse_window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(6000.0));
    c.bench_function("layout_sparse_200", |b| {
        b.iter(|| {
            layout(
                black_box(&sparse),
                sparse_window,
                &viewport,
                &options,
                None,
            )
            .unwrap()
        });
    });

    let dense = clustered_events(20, 50);
    let dense_window = TimeWindow::new(TimeStamp::from_days(0.0), TimeStamp::from_days(4000.0));
    c.bench_function("layout_dense_1000", |b| {
        b.iter(|| {
            layout(black_box(&dense), dense_window, &viewport, &options, None).unwrap()
        });
    });

    let previous = layout(&dense, dense_window, &viewport, &options, None).unwrap();
    let nudged = dense_window.panned_by(12.0 * 60.0 * 1000.0);
    c.bench_function("layout_dense_1000_warm", |b| {
        b.iter(|| {
            layout(
                black_box(&dense),
                nudged,
                &viewport,
                &options,
                Some(&previous),
            )
            .unwrap()
        });
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
