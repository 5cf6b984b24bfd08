//! Provides the tree representation.
//!
//! Provides core data structures for representing phylogenetic gene trees:
//! * [Tree] - Main tree structure using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//! * [PostOrderIter] and [PreOrderIter] for stack-based traversals

use crate::error::{Error, Result};
use crate::model::vertex::{BranchLength, Vertex};
use std::collections::HashSet;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree with arbitrary vertex degrees, represented using the
/// arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by
/// [VertexIndex]. The arena owns every vertex; a vertex refers to its
/// children and its parent by index only.
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained
///   (e.g. leaves need not be the first `n` indices).
/// - Leaves carry their gene identifier as label.
/// - Branch lengths are optional, but if provided must be non-negative.
///
/// # Construction
/// Add vertices bottom-up with [`Tree::add_leaf`] and [`Tree::add_internal`],
/// then mark the root with [`Tree::set_root`] (or use [`Tree::add_root`]).
/// Test validity with [`Tree::validate()`].
///
/// # Example
/// ```
/// use allelog::model::{BranchLength, Tree};
///
/// let mut tree = Tree::new();
/// let a = tree.add_leaf(Some(BranchLength::new(0.1)), "A".to_string());
/// let b = tree.add_leaf(Some(BranchLength::new(0.2)), "B".to_string());
/// let c = tree.add_leaf(None, "C".to_string());
/// tree.add_root(vec![a, b, c], None, None);
///
/// assert!(tree.validate().is_ok());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Tree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: VertexIndex,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Tree {
            vertices: Vec::new(),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        Tree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
        }
    }

    /// Adds a leaf to the tree, assigning a unique index, which gets returned.
    ///
    /// # Arguments
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    /// * `label` - Gene identifier of this leaf
    pub fn add_leaf(&mut self, branch_length: Option<BranchLength>, label: String) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new_leaf(index, branch_length, label));
        index
    }

    /// Adds a vertex with the given children, assigning a unique index, which gets returned.
    ///
    /// The children get their parent set to the new vertex.
    ///
    /// # Arguments
    /// * `children` - Indices of already added child vertices, in order
    /// * `branch_length` - Length of incoming branch, i.e. distance to parent (non-negative)
    /// * `label` - Optional label of the vertex
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        for &child in &children {
            self.vertices[child].set_parent(Some(index));
        }
        self.vertices
            .push(Vertex::new_internal(index, children, branch_length, label));
        index
    }

    /// Adds a vertex with the given children and marks it as root.
    ///
    /// # Returns
    /// The index of the newly created root vertex.
    pub fn add_root(
        &mut self,
        children: Vec<VertexIndex>,
        branch_length: Option<BranchLength>,
        label: Option<String>,
    ) -> VertexIndex {
        let index = self.add_internal(children, branch_length, label);
        self.root_index = index;
        index
    }

    /// Marks an already added vertex as root of this tree.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = index;
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set and thus tree hasn't been fully constructed yet.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_leaf()).count()
    }

    /// Returns the number of vertices with children (including the root).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|&v| v.is_internal()).count()
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns an iterator over all leaves, in pre-order.
    pub fn leaves(&self) -> impl Iterator<Item = &Vertex> {
        self.pre_order_iter().filter(|v| v.is_leaf())
    }

    /// Returns the labels of all leaves, in pre-order.
    pub fn leaf_labels(&self) -> Vec<&str> {
        self.leaves().filter_map(|v| v.label()).collect()
    }

    /// Returns the index of the first vertex (in pre-order) carrying `label`.
    ///
    /// Leaves and labelled internal vertices are both considered.
    pub fn find_by_label(&self, label: &str) -> Option<VertexIndex> {
        self.pre_order_iter()
            .find(|v| v.label() == Some(label))
            .map(|v| v.index())
    }

    /// Returns the sum of all branch lengths in the tree (unset lengths count as 0).
    pub fn total_branch_length(&self) -> f64 {
        self.pre_order_iter()
            .filter(|v| v.index() != self.root_index)
            .map(|v| v.length_or_zero())
            .sum()
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, in bounds and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - All child indices are valid and point back to correct parent
    /// - All parent indices are valid and include this vertex as a child
    /// - Every vertex is reachable from the root exactly once
    /// - Leaves have a non-empty label, and leaf labels are unique
    ///
    /// # Errors
    /// * [Error::MalformedTree] naming the first violated invariant
    /// * [Error::DuplicateLeaf] if two leaves share a label
    pub fn validate(&self) -> Result<()> {
        if !self.is_root_set() {
            return Err(malformed("no root set"));
        }
        if self.root_index >= self.vertices.len() {
            return Err(malformed(format!(
                "root index {} out of bounds",
                self.root_index
            )));
        }
        if self.root().has_parent() {
            return Err(malformed("root has a parent"));
        }

        let num_vertices = self.vertices.len();
        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return Err(malformed(format!(
                    "vertex at position {index} claims index {}",
                    vertex.index()
                )));
            }

            for &child in vertex.children() {
                if child >= num_vertices {
                    return Err(malformed(format!(
                        "vertex {index} has out of bounds child {child}"
                    )));
                }
                if self.vertices[child].parent() != Some(index) {
                    return Err(malformed(format!(
                        "child {child} does not point back to parent {index}"
                    )));
                }
            }

            match vertex.parent() {
                None if index != self.root_index => {
                    return Err(malformed(format!("non-root vertex {index} has no parent")));
                }
                None => {}
                Some(parent) => {
                    if parent >= num_vertices || !self.vertices[parent].children().contains(&index)
                    {
                        return Err(malformed(format!(
                            "parent of vertex {index} does not list it as child"
                        )));
                    }
                }
            }

            if vertex.is_leaf() && vertex.label().is_none_or(str::is_empty) {
                return Err(malformed(format!("leaf {index} has no label")));
            }
        }

        // Reachability, guarding against cycles and repeated children
        let mut visited = vec![false; num_vertices];
        let mut stack = vec![self.root_index];
        let mut num_visited = 0;
        while let Some(index) = stack.pop() {
            if visited[index] {
                return Err(malformed(format!("vertex {index} reached twice")));
            }
            visited[index] = true;
            num_visited += 1;
            stack.extend_from_slice(self.vertices[index].children());
        }
        if num_visited != num_vertices {
            return Err(malformed(format!(
                "{} vertices not reachable from root",
                num_vertices - num_visited
            )));
        }

        let mut seen = HashSet::new();
        for label in self.leaf_labels() {
            if !seen.insert(label) {
                return Err(Error::DuplicateLeaf(label.to_string()));
            }
        }

        Ok(())
    }
}

fn malformed<S: Into<String>>(reason: S) -> Error {
    Error::MalformedTree(reason.into())
}

impl std::ops::Index<VertexIndex> for Tree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        &self.vertices[index]
    }
}

impl std::ops::IndexMut<VertexIndex> for Tree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Arena maintenance (crate)
// ============================================================================
impl Tree {
    pub(crate) fn push_vertex(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    /// Rebuilds the arena from the vertices reachable from the root,
    /// re-indexed in pre-order. Detached vertices are dropped.
    pub(crate) fn compact(&mut self) {
        let order: Vec<VertexIndex> = self.pre_order_iter().map(|v| v.index()).collect();
        let mut new_index = vec![NO_ROOT_SET_INDEX; self.vertices.len()];
        for (position, &old) in order.iter().enumerate() {
            new_index[old] = position;
        }

        let mut old_vertices: Vec<Option<Vertex>> =
            std::mem::take(&mut self.vertices).into_iter().map(Some).collect();
        let mut vertices = Vec::with_capacity(order.len());
        for &old in &order {
            let Some(mut vertex) = old_vertices[old].take() else {
                continue;
            };
            vertex.set_index(new_index[old]);
            let parent = vertex.parent().map(|p| new_index[p]);
            vertex.set_parent(parent);
            for child in vertex.children_mut().iter_mut() {
                *child = new_index[*child];
            }
            vertices.push(vertex);
        }

        self.vertices = vertices;
        self.root_index = 0;
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Post-order traversal visits each vertex's children, left to right,
    /// before visiting the vertex itself.
    ///
    /// # Example
    /// ```
    /// use allelog::model::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf(None, "A".to_string());
    /// let b = tree.add_leaf(None, "B".to_string());
    /// let root = tree.add_root(vec![a, b], None, None);
    ///
    /// let indices: Vec<_> = tree.post_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![a, b, root]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use allelog::model::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let a = tree.add_leaf(None, "A".to_string());
    /// let b = tree.add_leaf(None, "B".to_string());
    /// let root = tree.add_root(vec![a, b], None, None);
    ///
    /// let indices: Vec<_> = tree.pre_order_iter().map(|v| v.index()).collect();
    /// assert_eq!(indices, vec![root, a, b]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited after all its descendants have been visited.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children in reverse, so the first child is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each vertex is visited before any of its descendants.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}
