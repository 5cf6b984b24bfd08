//! Extraction of allelic orthogroups from a gene tree.
//!
//! An orthogroup is a set of genes that descend from a common ancestor
//! (an internal vertex) without any lineage accumulating more than a
//! divergence budget of branch length, and that cover enough distinct taxa.
//! Every gene ends up in at most one orthogroup.
//!
//! # Pipeline
//! [extract_orthogroups] runs the stages in order:
//! 1. Optional rerooting ([`Tree::reroot_at_label`])
//! 2. [annotate_distances] - distance of every vertex from the root
//! 3. [generate_candidates] - genes below each internal vertex, via [valid_leaves]
//! 4. [resolve_clusters] - greedy, largest candidate first, into disjoint [Orthogroup]s
//! 5. [assign_labels] - `OG1, OG2, ...` and `non_OG` for the rest
//!
//! The stages are public, so partial runs (e.g. inspecting candidates) are possible.
//!
//! # Example
//! ```
//! use allelog::model::TaxonMap;
//! use allelog::newick::parse_str;
//! use allelog::orthogroup::{ClusterParams, Label, extract_orthogroups};
//!
//! let mut tree = parse_str("((human_1:0.01,chimp_1:0.02):0.3,(human_2:0.05,mouse_2:0.4):0.2);")?;
//! let taxa = TaxonMap::from_pairs([
//!     ("human", "human_1"), ("chimp", "chimp_1"),
//!     ("human", "human_2"), ("mouse", "mouse_2"),
//! ])?;
//! let params = ClusterParams::default().with_required_taxa(2);
//!
//! let assignment = extract_orthogroups(&mut tree, &taxa, &params)?;
//! assert_eq!(assignment.num_orthogroups(), 1);
//! assert_eq!(assignment.label_of("chimp_1"), Some(Label::Orthogroup(1)));
//! assert_eq!(assignment.label_of("mouse_2"), Some(Label::Unassigned));
//!
//! # Ok::<(), allelog::Error>(())
//! ```

pub mod assignment;
pub mod candidate;
pub mod distance;
pub mod params;
pub mod report;
pub mod resolver;
pub mod valid_leaves;

pub use assignment::{Assignment, Label, assign_labels};
pub use candidate::{Candidate, TaxonKey, distinct_taxa, generate_candidates};
pub use distance::{RootDistances, annotate_distances};
pub use params::{ClusterParams, MissingTaxonPolicy};
pub use report::{write_assignment, write_assignment_file};
pub use resolver::{Orthogroup, resolve_clusters};
pub use valid_leaves::valid_leaves;

use crate::error::{Error, Result};
use crate::model::{TaxonMap, Tree};

/// Runs the full pipeline on `tree` and labels each of its genes.
///
/// `tree` is rerooted in place if [ClusterParams::reroot] is set.
///
/// # Errors
/// * [Error::InvalidParameter] if `params` are out of range
/// * [Error::MalformedTree] or [Error::DuplicateLeaf] if `tree` is invalid
/// * [Error::NotFound] if the reroot label matches no vertex
/// * [Error::MissingTaxon] for genes without taxon under [MissingTaxonPolicy::Reject]
pub fn extract_orthogroups(
    tree: &mut Tree,
    taxa: &TaxonMap,
    params: &ClusterParams,
) -> Result<Assignment> {
    params.validate()?;
    tree.validate()?;
    check_taxon_coverage(tree, taxa, params.missing_taxon())?;

    if let Some(label) = params.reroot() {
        tree.reroot_at_label(label)?;
    }

    let tree: &Tree = tree;
    let distances = annotate_distances(tree);
    log::debug!(
        "Annotated {} vertices, deepest at distance {}",
        distances.len(),
        distances.max()
    );

    let candidates = generate_candidates(tree, taxa, &distances, params)?;
    log::debug!(
        "Found {} candidates among {} internal vertices",
        candidates.len(),
        tree.num_internal()
    );

    let orthogroups = resolve_clusters(candidates, taxa, params)?;
    for (i, orthogroup) in orthogroups.iter().enumerate() {
        log::debug!(
            "OG{}: {} genes of {} taxa below vertex {} (distance {} from root)",
            i + 1,
            orthogroup.size(),
            orthogroup.num_taxa(),
            orthogroup.origin(),
            orthogroup.origin_distance()
        );
    }

    let assignment = assign_labels(tree, &orthogroups);
    log::info!(
        "Extracted {} orthogroups: {} of {} genes assigned, {} unassigned",
        assignment.num_orthogroups(),
        assignment.num_assigned(),
        assignment.len(),
        assignment.num_unassigned()
    );
    Ok(assignment)
}

/// Warns once about genes without taxon, or fails on the first one under
/// [MissingTaxonPolicy::Reject].
fn check_taxon_coverage(tree: &Tree, taxa: &TaxonMap, policy: MissingTaxonPolicy) -> Result<()> {
    let missing: Vec<&str> = tree
        .leaf_labels()
        .into_iter()
        .filter(|gene| !taxa.contains_gene(gene))
        .collect();

    match missing.first() {
        None => Ok(()),
        Some(gene) if policy == MissingTaxonPolicy::Reject => {
            Err(Error::MissingTaxon(gene.to_string()))
        }
        Some(gene) => {
            log::warn!(
                "{} of {} genes have no taxon (first: '{}'), treated with policy '{}'",
                missing.len(),
                tree.num_leaves(),
                gene,
                policy
            );
            Ok(())
        }
    }
}
