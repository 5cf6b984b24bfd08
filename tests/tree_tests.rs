use allelog::error::Error;
use allelog::model::{BranchLength, Tree, Vertex};
use allelog::newick::{parse_str, to_newick};
use allelog::orthogroup::annotate_distances;

// --- HELPERS ---
fn bl(length: f64) -> Option<BranchLength> {
    Some(BranchLength::new(length))
}

fn labels_of<'a>(iter: impl Iterator<Item = &'a Vertex>) -> Vec<&'a str> {
    iter.map(|v| v.label().unwrap_or("?")).collect()
}

// --- CONSTRUCTION ---
#[test]
fn test_build_bottom_up() {
    let mut tree = Tree::with_capacity(5);
    let a = tree.add_leaf(bl(0.1), "A".to_string());
    let b = tree.add_leaf(bl(0.2), "B".to_string());
    let ab = tree.add_internal(vec![a, b], bl(0.3), Some("AB".to_string()));
    let c = tree.add_leaf(None, "C".to_string());
    let root = tree.add_root(vec![ab, c], None, None);

    assert!(tree.validate().is_ok());
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree[a].parent(), Some(ab));
    assert_eq!(tree[ab].parent(), Some(root));
    assert!(tree[root].is_root());
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert!((tree.total_branch_length() - 0.6).abs() < 1e-12);
}

#[test]
fn test_unrooted_tree_is_malformed() {
    let mut tree = Tree::new();
    let a = tree.add_leaf(None, "A".to_string());
    let b = tree.add_leaf(None, "B".to_string());
    tree.add_internal(vec![a, b], None, None);
    assert!(matches!(tree.validate(), Err(Error::MalformedTree(_))));
}

#[test]
fn test_unreachable_vertex_is_malformed() {
    let mut tree = Tree::new();
    let a = tree.add_leaf(None, "A".to_string());
    let b = tree.add_leaf(None, "B".to_string());
    let _orphan = tree.add_leaf(None, "C".to_string());
    tree.add_root(vec![a, b], None, None);
    assert!(matches!(tree.validate(), Err(Error::MalformedTree(_))));
}

#[test]
fn test_duplicate_leaf() {
    let tree = parse_str("((A,B),(C,B));").unwrap();
    assert!(matches!(tree.validate(), Err(Error::DuplicateLeaf(label)) if label == "B"));
}

// --- TRAVERSALS ---
#[test]
fn test_traversal_orders() {
    let tree = parse_str("((A,B)X,(C,D,E)Y,F)R;").unwrap();

    assert_eq!(
        labels_of(tree.post_order_iter()),
        vec!["A", "B", "X", "C", "D", "E", "Y", "F", "R"]
    );
    assert_eq!(
        labels_of(tree.pre_order_iter()),
        vec!["R", "X", "A", "B", "Y", "C", "D", "E", "F"]
    );
    assert_eq!(tree.leaf_labels(), vec!["A", "B", "C", "D", "E", "F"]);
}

#[test]
fn test_deep_caterpillar_does_not_overflow() {
    let mut newick = String::new();
    let depth = 20_000;
    for _ in 0..depth {
        newick.push('(');
    }
    newick.push_str("L0:1");
    for i in 1..=depth {
        newick.push_str(&format!(",L{}:1):1", i));
    }
    newick.push(';');

    let tree = parse_str(&newick).unwrap();

    assert_eq!(tree.num_leaves(), depth + 1);
    assert_eq!(tree.post_order_iter().count(), 2 * depth + 1);
    let distances = annotate_distances(&tree);
    let l0 = tree.find_by_label("L0").unwrap();
    assert_eq!(distances[l0], depth as f64);
    assert!(to_newick(&tree).ends_with(":1;"));
}

#[test]
fn test_find_by_label_prefers_pre_order() {
    let tree = parse_str("((A)target,(B)C,target2)R;").unwrap();
    let target = tree.find_by_label("target").unwrap();
    assert!(tree[target].is_internal());
    assert_eq!(tree.find_by_label("missing"), None);
}

// --- REROOTING ---
#[test]
fn test_reroot_at_leaf() {
    let mut tree = parse_str("((A:1,B:2):3,(C:4,D:5):6);").unwrap();
    tree.reroot_at_label("D").unwrap();

    assert!(tree.validate().is_ok());
    assert_eq!(to_newick(&tree), "(D:2.5,(C:4,(A:1,B:2):9):2.5);");
}

#[test]
fn test_reroot_at_internal_label() {
    let mut tree = parse_str("((A:1,B:2)X:3,C:4,D:5);").unwrap();
    tree.reroot_at_label("X").unwrap();

    assert!(tree.validate().is_ok());
    assert_eq!(to_newick(&tree), "((A:1,B:2)X:1.5,(C:4,D:5):1.5);");
    assert_eq!(tree.num_leaves(), 4);
}

#[test]
fn test_reroot_at_root_is_noop() {
    let mut tree = parse_str("((A:1,B:2)X:3,C:4)R;").unwrap();
    let before = to_newick(&tree);
    tree.reroot_at_label("R").unwrap();
    assert_eq!(to_newick(&tree), before);
}

#[test]
fn test_reroot_unknown_label() {
    let mut tree = parse_str("(A,B);").unwrap();
    let result = tree.reroot_at_label("Z");
    assert!(matches!(result, Err(Error::NotFound(label)) if label == "Z"));
}
