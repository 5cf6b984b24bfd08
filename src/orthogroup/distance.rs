//! Distance of every vertex from the root.

use crate::model::{Tree, VertexIndex};
use std::ops::Index;

/// Cumulative branch length from the root to each vertex, indexed by [VertexIndex].
///
/// Kept apart from the [Tree], so the tree itself holds no derived state.
/// The root has distance 0 and every other vertex the distance of its parent
/// plus its own branch length (unset lengths count as 0).
#[derive(Debug, Clone, PartialEq)]
pub struct RootDistances {
    distances: Vec<f64>,
}

impl RootDistances {
    /// Returns the distance of vertex `index` from the root.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: VertexIndex) -> f64 {
        self.distances[index]
    }

    /// Returns the largest distance of any vertex from the root.
    pub fn max(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

impl Index<VertexIndex> for RootDistances {
    type Output = f64;

    fn index(&self, index: VertexIndex) -> &f64 {
        &self.distances[index]
    }
}

/// Computes the [RootDistances] of all vertices in a single pre-order pass.
///
/// Must run after any rerooting, since rerooting re-indexes vertices.
pub fn annotate_distances(tree: &Tree) -> RootDistances {
    let mut distances = vec![0.0; tree.num_vertices()];

    // Pre-order guarantees the parent is done before its children
    for vertex in tree.pre_order_iter() {
        if let Some(parent) = vertex.parent() {
            distances[vertex.index()] = distances[parent] + vertex.length_or_zero();
        }
    }

    log::trace!("Annotated root distances of {} vertices", distances.len());
    RootDistances { distances }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BranchLength;

    #[test]
    fn test_distances_accumulate_along_paths() {
        // ((A:1,B)X:2,C:0.5):7;
        let mut tree = Tree::new();
        let a = tree.add_leaf(Some(BranchLength::new(1.0)), "A".to_string());
        let b = tree.add_leaf(None, "B".to_string());
        let x = tree.add_internal(vec![a, b], Some(BranchLength::new(2.0)), None);
        let c = tree.add_leaf(Some(BranchLength::new(0.5)), "C".to_string());
        let root = tree.add_root(vec![x, c], Some(BranchLength::new(7.0)), None);

        let distances = annotate_distances(&tree);
        assert_eq!(distances.len(), 5);
        // root's own branch is ignored
        assert_eq!(distances[root], 0.0);
        assert_eq!(distances[x], 2.0);
        assert_eq!(distances[a], 3.0);
        assert_eq!(distances[b], 2.0);
        assert_eq!(distances.get(c), 0.5);
        assert_eq!(distances.max(), 3.0);
    }
}
