use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use tui_treeflat::{NodePath, TreeListState, TreeSource};

// Complete tree with fixed fanout, defined by arithmetic only.
struct Fanout {
    width: usize,
    depth: usize,
}

impl TreeSource for Fanout {
    fn child_count(&self, path: &NodePath) -> usize {
        if path.depth() < self.depth {
            self.width
        } else {
            0
        }
    }
}

fn bench_resolver(c: &mut Criterion) {
    let source = Fanout { width: 4, depth: 6 };
    let mut state = TreeListState::new();
    state.expand_all(&source);
    let rows = state.visible_row_count(&source);

    c.bench_function("path_for_flat_index/last", |b| {
        b.iter(|| state.path_at(&source, black_box(rows - 1)));
    });

    let deep = NodePath::from([3, 3, 3, 3, 3, 3]);
    c.bench_function("flat_index_for_path/deep", |b| {
        b.iter(|| state.flat_index_of(&source, black_box(&deep)));
    });

    c.bench_function("visible_row_count/full", |b| {
        b.iter(|| state.visible_row_count(black_box(&source)));
    });
}

fn bench_toggle(c: &mut Criterion) {
    let source = Fanout { width: 4, depth: 6 };
    c.bench_function("expand_collapse/top", |b| {
        let mut state = TreeListState::new();
        state.expand_all(&source);
        let top = NodePath::from([0]);
        b.iter(|| {
            let removed = state.collapse(&source, &top);
            let inserted = state.expand(&source, &top);
            (removed, inserted)
        });
    });
}

criterion_group!(benches, bench_resolver, bench_toggle);
criterion_main!(benches);
