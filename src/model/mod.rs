//! Data model for phylogenetic gene trees and taxon assignments.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Vertices may have any number
//! of children; a vertex without children is a leaf and carries the
//! identifier of its gene as label.
//!
//! Trees are typically constructed by the [Newick parser](crate::newick),
//! bottom-up via [`Tree::add_leaf`] and [`Tree::add_internal`].
//! [`Tree::reroot_at_label`] moves the root onto the edge above a vertex.
//!
//! # Taxon assignment
//! [TaxonMap] maps each gene to the taxon (species, strain, ...) it was
//! sampled from.

mod reroot;
pub mod taxon_map;
pub mod tree;
pub mod vertex;

pub use taxon_map::TaxonMap;
pub use tree::{PostOrderIter, PreOrderIter, Tree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
