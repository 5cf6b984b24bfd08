//! Collection of the leaves within a divergence budget below a vertex.

use crate::model::{Tree, VertexIndex};

/// Returns the labels of the leaves reachable from `index` within `budget`.
///
/// Descending from `index`, a child edge longer than the budget remaining at
/// that point excludes the child's whole subtree; otherwise the budget is
/// reduced by the edge length and the descent continues. An edge exactly as
/// long as the remaining budget is included. Each lineage is checked on its
/// own, so siblings can be excluded independently.
///
/// A leaf always yields itself, whatever the budget. Leaves are returned in
/// left-to-right order. Uses an explicit stack, so deep trees are fine.
///
/// # Example
/// ```
/// use allelog::model::{BranchLength, Tree};
/// use allelog::orthogroup::valid_leaves;
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(0.05)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(0.1)), "B".to_string());
/// let c = tree.add_leaf(Some(BranchLength::new(0.2)), "C".to_string());
/// let root = tree.add_root(vec![a, b, c], None, None);
///
/// assert_eq!(valid_leaves(&tree, root, 0.1), vec!["A", "B"]);
/// assert_eq!(valid_leaves(&tree, c, 0.0), vec!["C"]);
/// ```
pub fn valid_leaves(tree: &Tree, index: VertexIndex, budget: f64) -> Vec<&str> {
    let mut leaves = Vec::new();
    let mut stack = vec![(index, budget)];

    while let Some((current, remaining)) = stack.pop() {
        let vertex = &tree[current];
        if vertex.is_leaf() {
            if let Some(label) = vertex.label() {
                leaves.push(label);
            }
            continue;
        }

        // Reverse push keeps the first child on top
        for &child in vertex.children().iter().rev() {
            let length = tree[child].length_or_zero();
            if length <= remaining {
                stack.push((child, remaining - length));
            }
        }
    }

    leaves
}
