use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use ancestree::newick::{NewickStyle, parse_str, to_newick};
use std::hint::black_box;

const STAR_SIZES: &[(&str, usize)] = &[("star-1k", 1_000), ("star-10k", 10_000), ("star-100k", 100_000)];

/// Star tree with `num_leaves` leaves below the root.
fn star_newick(num_leaves: usize) -> String {
    let leaves: Vec<String> = (0..num_leaves).map(|i| format!("t{i}:{}", 0.001 * (i % 97) as f64)).collect();
    format!("({});", leaves.join(","))
}

/// Caterpillar of `depth` nested groups, each with three children.
fn deep_newick(depth: usize) -> String {
    let mut newick = String::new();
    for i in 0..depth {
        newick.push_str(&format!("(a{i}:0.1,b{i}:0.1,"));
    }
    newick.push_str("z:0.1");
    for _ in 0..depth {
        newick.push_str("):0.2");
    }
    newick.push(';');
    newick
}

fn rebinarize_star(c: &mut Criterion) {
    for (name, size) in STAR_SIZES {
        let tree = parse_str(star_newick(*size)).unwrap();
        c.bench_function(&format!("rebinarize {name}"), |b| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| black_box(tree.rebinarize()),
                BatchSize::LargeInput,
            );
        });
    }
}

fn newick_io(c: &mut Criterion) {
    let star = star_newick(10_000);
    c.bench_function("parse star-10k", |b| b.iter(|| parse_str(black_box(&star)).unwrap()));

    let deep = deep_newick(10_000);
    c.bench_function("parse deep-10k", |b| b.iter(|| parse_str(black_box(&deep)).unwrap()));

    let mut tree = parse_str(&deep).unwrap();
    tree.rebinarize();
    c.bench_function("write deep-10k", |b| {
        b.iter(|| to_newick(black_box(&tree), NewickStyle::Plain).unwrap())
    });
}

criterion_group!(regression, rebinarize_star, newick_io);
criterion_main!(regression);
