//! Allelog is a library (and command-line tool) to extract allelic
//! orthogroups from phylogenetic gene trees.
//!
//! Given a gene tree, the taxon each gene (leaf) was sampled from, a
//! branch-length divergence cutoff and a minimum number of taxa, the leaves
//! are partitioned into disjoint orthogroups of closely related gene copies.
//! Genes in no orthogroup are reported as `non_OG`.
//!
//! Core functionality provided:
//! - Tree model: arena-based [Tree](model::Tree) with arbitrary vertex
//!   degrees, validation and rerooting. See [crate::model].
//! - Newick: parse a single Newick tree from a file or string, write trees
//!   back. See [crate::newick].
//! - Taxon table: tab-separated `taxon<TAB>gene` lines into a
//!   [TaxonMap](model::TaxonMap).
//! - Orthogroups: the extraction pipeline and its stages, configured with
//!   [ClusterParams](orthogroup::ClusterParams). See [crate::orthogroup].
//!
//! Limitations:
//! - One tree per run (no Nexus files, no multi-tree batches)
//! - Newick annotations (`[&...]`) are skipped like comments
//!
//! # Usage patterns
//! 1. [extract_orthogroups_from_files] runs everything on a tree file and
//!    a taxon table.
//! 2. Load the inputs yourself and call
//!    [extract_orthogroups](orthogroup::extract_orthogroups), or run the
//!    stages of [crate::orthogroup] one by one.
//!
//! ## Example
//! ```no_run
//! use allelog::extract_orthogroups_from_files;
//! use allelog::orthogroup::{ClusterParams, write_assignment};
//!
//! let params = ClusterParams::default()
//!     .with_max_length(0.05)
//!     .with_reroot("outgroup_gene");
//! let assignment = extract_orthogroups_from_files("OG0001234.nwk", "taxa.tsv", &params)?;
//! println!("Found {} orthogroups", assignment.num_orthogroups());
//! write_assignment(std::io::stdout(), &assignment)?;
//!
//! # Ok::<(), allelog::Error>(())
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod orthogroup;
pub mod parser;

pub use crate::error::{Error, Result};

use crate::model::TaxonMap;
use crate::orthogroup::{Assignment, ClusterParams};
use std::path::Path;

// ============================================================================
// Quick API
// ============================================================================
/// Parses the Newick tree at `tree_path` and the taxon table at `taxa_path`,
/// then extracts orthogroups with `params`.
///
/// See [`orthogroup::extract_orthogroups`] for the pipeline and its errors.
pub fn extract_orthogroups_from_files<P: AsRef<Path>, Q: AsRef<Path>>(
    tree_path: P,
    taxa_path: Q,
    params: &ClusterParams,
) -> Result<Assignment> {
    let mut tree = newick::parse_file(tree_path)?;
    let taxa = TaxonMap::from_file(taxa_path)?;
    orthogroup::extract_orthogroups(&mut tree, &taxa, params)
}
