//! Benchmarks for tree → graph conversion.
//!
//! Run with: cargo bench -p treeviz-graph
//! Results are saved to target/criterion/

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use treeviz_graph::{render_dot, BinaryNode, DotStyle, GraphDescription};

/// Build a complete tree of the given height with in-order numbering.
fn complete_tree(height: u32) -> BinaryNode<u32> {
    fn build(lo: u32, hi: u32) -> Option<BinaryNode<u32>> {
        if lo > hi {
            return None;
        }
        let mid = lo + (hi - lo) / 2;
        let mut node = BinaryNode::leaf(mid);
        if let Some(left) = build(lo, mid - 1) {
            node = node.with_left(left);
        }
        if let Some(right) = build(mid + 1, hi) {
            node = node.with_right(right);
        }
        Some(node)
    }
    build(1, (1 << height) - 1).unwrap_or_else(|| BinaryNode::leaf(0))
}

/// Build a left-leaning chain, the worst case for recursive traversal.
fn chain(length: u32) -> BinaryNode<u32> {
    let mut node = BinaryNode::leaf(0);
    for value in 1..length {
        node = BinaryNode::leaf(value).with_left(node);
    }
    node
}

fn bench_complete_trees(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_tree");

    for height in [8, 12, 16] {
        let tree = complete_tree(height);
        group.throughput(Throughput::Elements(tree.len() as u64));

        group.bench_with_input(BenchmarkId::new("describe", height), &tree, |b, tree| {
            b.iter(|| black_box(GraphDescription::from_tree(Some(tree))));
        });

        group.bench_with_input(BenchmarkId::new("describe_and_dot", height), &tree, |b, tree| {
            b.iter(|| {
                let graph = GraphDescription::from_tree(Some(tree));
                black_box(render_dot(&graph, &DotStyle::default()))
            });
        });
    }

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");

    for length in [1_000, 100_000] {
        let tree = chain(length);
        group.throughput(Throughput::Elements(u64::from(length)));
        group.bench_with_input(BenchmarkId::new("describe", length), &tree, |b, tree| {
            b.iter(|| black_box(GraphDescription::from_tree(Some(tree))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_complete_trees, bench_chain);
criterion_main!(benches);
