//! Crate-wide error type.
//!
//! Every fatal condition of a run surfaces as an [Error]. None of them is
//! retried and none produces partial output.

use crate::parser::ParsingError;
use thiserror::Error;

/// Errors raised while loading inputs or extracting orthogroups.
#[derive(Debug, Error)]
pub enum Error {
    /// A reroot label matched no vertex of the tree.
    #[error("No vertex labelled '{0}' found in tree")]
    NotFound(String),

    /// Tree violates a structural invariant (e.g. no root, inconsistent links).
    #[error("Malformed tree - {0}")]
    MalformedTree(String),

    /// Two leaves carry the same label, so genes cannot be told apart.
    #[error("Leaf label '{0}' occurs more than once in tree")]
    DuplicateLeaf(String),

    /// A leaf gene has no entry in the taxon map (only with [MissingTaxonPolicy::Reject]).
    ///
    /// [MissingTaxonPolicy::Reject]: crate::orthogroup::MissingTaxonPolicy::Reject
    #[error("Gene '{0}' has no taxon assigned")]
    MissingTaxon(String),

    /// Clustering parameters out of range.
    #[error("Invalid parameter - {0}")]
    InvalidParameter(String),

    /// Syntax error in a Newick input.
    #[error(transparent)]
    Parsing(#[from] ParsingError),

    /// Malformed line in a taxon table.
    #[error("Invalid taxon table at line {line} - {msg}")]
    TaxonTable { line: usize, msg: String },

    /// A gene is assigned to two different taxa.
    #[error("Gene '{gene}' assigned to both taxon '{first}' and taxon '{second}'")]
    ConflictingTaxon {
        gene: String,
        first: String,
        second: String,
    },

    #[error("IO error - {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
