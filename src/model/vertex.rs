//! Vertex module for phylogenetic tree representation.

use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree with any number of children.
///
/// A vertex is
/// - the **root** if it has no parent,
/// - a **leaf** if it has no children,
/// - **internal** otherwise.
///
/// # Invariants
/// - `index` is the position of the vertex in the tree arena
/// - `branch_length` is non-negative and finite (enforced by [BranchLength]); might not be set
/// - `parent` is `None` only for the root (and for vertices not yet attached during construction)
/// - Leaves carry a label (their gene identifier); internal vertices may carry one
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    index: VertexIndex,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
    branch_length: Option<BranchLength>,
    label: Option<String>,
}

impl Vertex {
    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `branch_length` - Distance to parent vertex (non-negative)
    /// * `label` - Identifier of the gene represented by this leaf
    pub fn new_leaf(index: VertexIndex, branch_length: Option<BranchLength>, label: String) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            branch_length,
            label: Some(label),
        }
    }

    /// Creates a new vertex with children (internal vertex or root).
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `children` - Indices of child vertices, in order
    /// * `branch_length` - Distance to parent vertex (non-negative)
    /// * `label` - Optional label (e.g. a support value or clade name)
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            branch_length,
            label,
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    /// Returns the label of this vertex, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns whether this vertex has a [BranchLength].
    pub fn has_branch_length(&self) -> bool {
        self.branch_length.is_some()
    }

    /// Returns the branch length of the incoming edge, or `None` if unset.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the branch length of the incoming edge, treating an unset length as 0.
    pub fn length_or_zero(&self) -> f64 {
        self.branch_length.map_or(0.0, |bl| *bl)
    }

    pub(crate) fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Returns the child indices (empty for leaves).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }

    /// Returns `true` if this vertex is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has children.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    ///
    /// Note that during construction, vertices not attached yet have no parent either.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns `true` if this vertex has a parent set.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Arguments
    /// * `length` - The branch length value (must be non-negative)
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    /// Use [`BranchLength::try_new`] for unchecked input.
    pub fn new(length: f64) -> Self {
        assert!(length >= 0.0, "Branch length must be non-negative, got {}", length);
        assert!(length.is_finite(), "Branch length must be finite, got {}", length);
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative, NaN or infinite.
    pub fn try_new(length: f64) -> Option<Self> {
        if length >= 0.0 && length.is_finite() {
            Some(BranchLength(length))
        } else {
            None
        }
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_length_rejects_invalid_values() {
        assert!(BranchLength::try_new(-0.1).is_none());
        assert!(BranchLength::try_new(f64::NAN).is_none());
        assert!(BranchLength::try_new(f64::INFINITY).is_none());
        assert_eq!(*BranchLength::try_new(0.0).unwrap(), 0.0);
    }

    #[test]
    #[should_panic]
    fn test_branch_length_new_panics_on_negative() {
        BranchLength::new(-1.0);
    }

    #[test]
    fn test_leaf_and_internal_kinds() {
        let leaf = Vertex::new_leaf(0, None, "geneA".to_string());
        assert!(leaf.is_leaf());
        assert_eq!(leaf.label(), Some("geneA"));
        assert_eq!(leaf.length_or_zero(), 0.0);

        let internal = Vertex::new_internal(2, vec![0, 1], Some(BranchLength::new(0.5)), None);
        assert!(internal.is_internal());
        assert!(internal.label().is_none());
        assert_eq!(internal.children(), &[0, 1]);
        assert_eq!(internal.length_or_zero(), 0.5);
    }
}
