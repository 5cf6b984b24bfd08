use allelog::model::{BranchLength, TaxonMap, Tree, VertexIndex};
use allelog::newick::{parse_str, to_newick};
use allelog::orthogroup::{ClusterParams, extract_orthogroups};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const BALANCED_TREES: &[(&str, usize)] = &[("balanced-n1k", 1_000), ("balanced-n10k", 10_000)];

const CATERPILLAR_TREES: &[(&str, usize)] = &[("caterpillar-n2k", 2_000)];

const NUM_TAXA: usize = 12;

/// Branch length derived from the vertex count, spread over [0, 0.05).
fn length(i: usize) -> Option<BranchLength> {
    Some(BranchLength::new((i * 7919 % 50) as f64 / 1000.0))
}

fn taxa_for(num_leaves: usize) -> TaxonMap {
    TaxonMap::from_pairs((0..num_leaves).map(|i| (format!("t{}", i % NUM_TAXA), format!("g{}", i))))
        .unwrap()
}

fn balanced(num_leaves: usize) -> Tree {
    let mut tree = Tree::with_capacity(2 * num_leaves);
    let mut level: Vec<VertexIndex> = (0..num_leaves)
        .map(|i| tree.add_leaf(length(i), format!("g{}", i)))
        .collect();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| match pair {
                [single] => *single,
                _ => {
                    let n = tree.num_vertices();
                    tree.add_internal(pair.to_vec(), length(n), None)
                }
            })
            .collect();
    }
    tree.set_root(level[0]);
    tree
}

fn caterpillar(num_leaves: usize) -> Tree {
    let mut tree = Tree::with_capacity(2 * num_leaves);
    let mut spine = tree.add_leaf(length(0), "g0".to_string());
    for i in 1..num_leaves {
        let leaf = tree.add_leaf(length(i), format!("g{}", i));
        let n = tree.num_vertices();
        spine = tree.add_internal(vec![spine, leaf], length(n), None);
    }
    tree.set_root(spine);
    tree
}

fn run_pipeline(tree: &Tree, taxa: &TaxonMap, params: &ClusterParams) {
    let mut tree = tree.clone();
    let assignment = extract_orthogroups(&mut tree, taxa, params).unwrap();
    black_box(assignment);
}

fn pipeline(c: &mut Criterion) {
    let params = ClusterParams::default();
    for &(name, num_leaves) in BALANCED_TREES {
        let tree = balanced(num_leaves);
        let taxa = taxa_for(num_leaves);
        c.bench_function(name, |b| b.iter(|| run_pipeline(&tree, &taxa, &params)));
    }
}

/// Caterpillars are the quadratic worst case of leaf collection.
fn pipeline_worst_case(c: &mut Criterion) {
    let params = ClusterParams::default().with_max_length(1.0);
    for &(name, num_leaves) in CATERPILLAR_TREES {
        let tree = caterpillar(num_leaves);
        let taxa = taxa_for(num_leaves);
        c.bench_function(name, |b| b.iter(|| run_pipeline(&tree, &taxa, &params)));
    }
}

fn newick_parsing(c: &mut Criterion) {
    let newick = to_newick(&balanced(10_000));
    c.bench_function("parse-balanced-n10k", |b| {
        b.iter(|| black_box(parse_str(&newick).unwrap()))
    });
}

criterion_group!(regression, pipeline, newick_parsing);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = pipeline_worst_case
}
criterion_main!(regression, reporting);
