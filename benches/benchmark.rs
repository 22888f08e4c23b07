use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use nlxml::model::{Branch, Color, LeafKind, NeuronData, NeuronType, Point, Tree};
use nlxml::nlxml::{decode, encode};
use nlxml::simplify::simplify;
use nlxml::swc::{SwcWriter, flatten, parse_str, reconstruct};
use std::hint::black_box;

/// Binary tree of the given depth, each branch holding a short polyline.
fn bushy_tree(depth: usize, points_per_branch: usize) -> Branch {
    let mut level: Vec<Branch> = (0..1usize << depth)
        .map(|i| polyline(i as f64, points_per_branch))
        .collect();
    for d in (0..depth).rev() {
        let mut parents = Vec::with_capacity(level.len() / 2);
        let mut children = level.into_iter();
        for i in 0..1usize << d {
            let pair: Vec<Branch> = children.by_ref().take(2).collect();
            parents.push(polyline(i as f64, points_per_branch).with_children(pair));
        }
        level = parents;
    }
    level.pop().unwrap_or_default()
}

/// Unbranched chain nested `depth` levels deep.
fn deep_chain(depth: usize) -> Branch {
    let mut branch = polyline(0.0, 1);
    for i in 0..depth {
        branch = polyline(i as f64, 1).with_children(vec![branch]);
    }
    branch
}

fn polyline(offset: f64, n: usize) -> Branch {
    let points = (0..n)
        .map(|k| Point::new(offset, k as f64 * 0.5, 0.0, 1.0))
        .collect();
    Branch::new(LeafKind::Normal).with_points(points)
}

fn data_with(root: Branch) -> NeuronData {
    let mut data = NeuronData::new();
    data.trees
        .push(Tree::new(NeuronType::Dendrite, Color::WHITE).with_root(root));
    data
}

fn nested_codec(c: &mut Criterion) {
    let data = data_with(bushy_tree(12, 8));
    let document = encode(&data);

    c.bench_function("nlxml encode bushy", |b| b.iter(|| encode(black_box(&data))));
    c.bench_function("nlxml decode bushy", |b| {
        b.iter(|| decode(black_box(document.as_bytes())).unwrap())
    });
}

fn flat_codec(c: &mut Criterion) {
    let data = data_with(bushy_tree(12, 8));
    let records = flatten(&data);
    let text = SwcWriter::new().render(&records);

    c.bench_function("swc flatten bushy", |b| b.iter(|| flatten(black_box(&data))));
    c.bench_function("swc reconstruct bushy", |b| {
        b.iter(|| reconstruct(black_box(&records)).unwrap())
    });
    c.bench_function("swc parse bushy", |b| b.iter(|| parse_str(black_box(&text)).unwrap()));
}

fn deep_nesting(c: &mut Criterion) {
    c.bench_function("simplify deep chain", |b| {
        b.iter_batched(
            || data_with(deep_chain(50_000)),
            |mut data| simplify(&mut data),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(regression, nested_codec, flat_codec);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = deep_nesting
}
criterion_main!(regression, reporting);
