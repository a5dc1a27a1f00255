//! Decode and playthrough benchmarks.
//!
//! Levels are tiny (at most 127 vertices), so these mostly guard against
//! accidental quadratic behavior in the codec or the per-move tables.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hamiltrail::graph::{Direction, Graph, VertexId};
use hamiltrail::PathEngine;

/// A maximal chain level: 127 vertices in a line, start at one end, end at
/// the other, alternating double-visit flags kept off to keep the walk
/// simple.
fn chain_level() -> Graph {
    let mut builder = Graph::builder();
    let ids: Vec<_> = (0..127).map(|_| builder.add_vertex(0, 0, 1)).collect();
    builder.mark_start(ids[0]);
    builder.mark_end(*ids.last().unwrap());
    for pair in ids.windows(2) {
        builder.add_edge(pair[0], pair[1], Direction::Undirected);
    }
    builder.build().unwrap()
}

fn bench_decode(c: &mut Criterion) {
    let bytes = chain_level().encode();

    c.bench_function("decode_chain_127", |b| {
        b.iter(|| Graph::decode(black_box(&bytes)).unwrap())
    });
}

fn bench_playthrough(c: &mut Criterion) {
    let graph = Arc::new(chain_level());

    c.bench_function("playthrough_chain_127", |b| {
        b.iter(|| {
            let mut engine = PathEngine::new(Arc::clone(&graph));
            for target in 1..127 {
                assert!(engine.attempt_move(VertexId::new(target)));
            }
            assert!(engine.is_solved());
            black_box(engine.energy())
        })
    });
}

fn bench_undo_redo(c: &mut Criterion) {
    let graph = Arc::new(chain_level());
    let mut engine = PathEngine::new(Arc::clone(&graph));
    for target in 1..100 {
        assert!(engine.attempt_move(VertexId::new(target)));
    }

    c.bench_function("undo_redo_step", |b| {
        b.iter(|| {
            engine.undo();
            engine.attempt_move(black_box(VertexId::new(99)))
        })
    });
}

criterion_group!(benches, bench_decode, bench_playthrough, bench_undo_redo);
criterion_main!(benches);
