//! Rerooting of a [Tree] on the incoming edge of a target vertex.
//!
//! The new root is inserted at the midpoint of the edge above the target, so
//! that the target becomes the outgroup. The path from the target's former
//! parent up to the old root is inverted; every inverted edge keeps its
//! length. If the old root is left with a single child it is spliced out and
//! its two edges are merged. Leaf set and all pairwise leaf path lengths stay
//! the same.

use crate::error::{Error, Result};
use crate::model::tree::{Tree, VertexIndex};
use crate::model::vertex::{BranchLength, Vertex};

impl Tree {
    /// Reroots the tree on the incoming edge of the first vertex (in pre-order)
    /// carrying `label`.
    ///
    /// # Errors
    /// * [Error::NotFound] if no vertex carries `label`
    /// * [Error::MalformedTree] / [Error::DuplicateLeaf] if the tree is invalid
    pub fn reroot_at_label(&mut self, label: &str) -> Result<()> {
        let target = self
            .find_by_label(label)
            .ok_or_else(|| Error::NotFound(label.to_string()))?;
        self.reroot_at(target)
    }

    /// Reroots the tree on the incoming edge of vertex `target`.
    ///
    /// Rerooting at the current root leaves the tree unchanged.
    /// Otherwise vertices get re-indexed, so indices obtained before
    /// the call are invalidated.
    ///
    /// # Errors
    /// [Error::MalformedTree] / [Error::DuplicateLeaf] if the tree is invalid.
    ///
    /// # Panics
    /// Panics if `target` is out of bounds.
    pub fn reroot_at(&mut self, target: VertexIndex) -> Result<()> {
        self.validate()?;

        let Some(parent) = self[target].parent() else {
            log::warn!("Reroot target {target} already is the root, tree left unchanged");
            return Ok(());
        };
        let old_root = self.root_index();
        let half = self[target]
            .branch_length()
            .map(|bl| BranchLength::new(*bl / 2.0));

        // Hang target and its former parent below a fresh root
        self[parent].children_mut().retain(|&c| c != target);
        let new_root = self.num_vertices();
        self.push_vertex(Vertex::new_internal(new_root, vec![target, parent], None, None));
        self[target].set_parent(Some(new_root));
        self[target].set_branch_length(half);

        // Invert the path from `parent` up to the old root
        let mut current = parent;
        let mut new_parent = new_root;
        let mut new_length = half;
        loop {
            let old_parent = self[current].parent();
            let old_length = self[current].branch_length();
            self[current].set_parent(Some(new_parent));
            self[current].set_branch_length(new_length);

            let Some(up) = old_parent else {
                break;
            };
            self[up].children_mut().retain(|&c| c != current);
            self[current].children_mut().push(up);

            new_parent = current;
            new_length = old_length;
            current = up;
        }

        self.set_root(new_root);
        self.suppress_degenerate(old_root);
        self.compact();

        log::debug!(
            "Rerooted tree above vertex {target}, now {} vertices",
            self.num_vertices()
        );
        Ok(())
    }

    /// Splices out `index` if it is left with one child and removes it if it
    /// is left with none, continuing upwards while the parent degenerates.
    fn suppress_degenerate(&mut self, mut index: VertexIndex) {
        loop {
            let Some(parent) = self[index].parent() else {
                return;
            };
            match self[index].children().len() {
                0 => {
                    self[parent].children_mut().retain(|&c| c != index);
                    self[index].set_parent(None);
                    index = parent;
                }
                1 => {
                    let child = self[index].children()[0];
                    let merged =
                        merge_lengths(self[child].branch_length(), self[index].branch_length());
                    self[child].set_parent(Some(parent));
                    self[child].set_branch_length(merged);
                    for sibling in self[parent].children_mut().iter_mut() {
                        if *sibling == index {
                            *sibling = child;
                        }
                    }
                    self[index].children_mut().clear();
                    self[index].set_parent(None);
                    return;
                }
                _ => return,
            }
        }
    }
}

fn merge_lengths(a: Option<BranchLength>, b: Option<BranchLength>) -> Option<BranchLength> {
    match (a, b) {
        (None, None) => None,
        _ => Some(BranchLength::new(
            a.map_or(0.0, |bl| *bl) + b.map_or(0.0, |bl| *bl),
        )),
    }
}
