//! Candidate orthogroups, one per qualifying internal vertex.

use crate::error::{Error, Result};
use crate::model::{TaxonMap, Tree, VertexIndex};
use crate::orthogroup::distance::RootDistances;
use crate::orthogroup::params::{ClusterParams, MissingTaxonPolicy};
use crate::orthogroup::valid_leaves::valid_leaves;
use std::collections::BTreeSet;

/// A bucket of taxon diversity.
///
/// Genes without taxon only form a bucket of their own under
/// [MissingTaxonPolicy::Singleton].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaxonKey<'a> {
    /// Taxon from the [TaxonMap]
    Taxon(&'a str),
    /// Gene without taxon, standing for itself
    Unmapped(&'a str),
}

/// Returns the distinct taxa covered by `genes`.
///
/// # Errors
/// [Error::MissingTaxon] for the first gene without taxon,
/// if `policy` is [MissingTaxonPolicy::Reject].
pub fn distinct_taxa<'a>(
    genes: &[&'a str],
    taxa: &'a TaxonMap,
    policy: MissingTaxonPolicy,
) -> Result<BTreeSet<TaxonKey<'a>>> {
    let mut keys = BTreeSet::new();
    for &gene in genes {
        match (taxa.taxon_of(gene), policy) {
            (Some(taxon), _) => {
                keys.insert(TaxonKey::Taxon(taxon));
            }
            (None, MissingTaxonPolicy::Exclude) => {}
            (None, MissingTaxonPolicy::Singleton) => {
                keys.insert(TaxonKey::Unmapped(gene));
            }
            (None, MissingTaxonPolicy::Reject) => {
                return Err(Error::MissingTaxon(gene.to_string()));
            }
        }
    }
    Ok(keys)
}

// =#========================================================================#=
// CANDIDATE
// =#========================================================================#=
/// Genes within the divergence budget below one internal vertex, covering
/// enough taxa to possibly form an orthogroup.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<'a> {
    origin: VertexIndex,
    rank: usize,
    origin_distance: f64,
    genes: Vec<&'a str>,
    taxa: BTreeSet<TaxonKey<'a>>,
}

impl<'a> Candidate<'a> {
    pub(crate) fn new(
        origin: VertexIndex,
        rank: usize,
        origin_distance: f64,
        genes: Vec<&'a str>,
        taxa: BTreeSet<TaxonKey<'a>>,
    ) -> Self {
        Self {
            origin,
            rank,
            origin_distance,
            genes,
            taxa,
        }
    }

    /// Index of the internal vertex the genes were collected from.
    pub fn origin(&self) -> VertexIndex {
        self.origin
    }

    /// Position of the origin among internal vertices in post-order.
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// Distance of the origin from the root.
    pub fn origin_distance(&self) -> f64 {
        self.origin_distance
    }

    /// Genes in left-to-right leaf order.
    pub fn genes(&self) -> &[&'a str] {
        &self.genes
    }

    pub fn size(&self) -> usize {
        self.genes.len()
    }

    pub fn taxa(&self) -> &BTreeSet<TaxonKey<'a>> {
        &self.taxa
    }

    pub fn num_taxa(&self) -> usize {
        self.taxa.len()
    }
}

/// Collects a [Candidate] for every internal vertex whose valid leaves
/// (within `params.max_length()`) cover at least `params.required_taxa()` taxa.
///
/// Candidates are returned in post-order of their origin, so each one's
/// [rank](Candidate::rank) is also its discovery position.
///
/// # Errors
/// [Error::MissingTaxon] under [MissingTaxonPolicy::Reject].
pub fn generate_candidates<'a>(
    tree: &'a Tree,
    taxa: &'a TaxonMap,
    distances: &RootDistances,
    params: &ClusterParams,
) -> Result<Vec<Candidate<'a>>> {
    let mut candidates = Vec::new();

    let internal_vertices = tree.post_order_iter().filter(|v| v.is_internal());
    for (rank, vertex) in internal_vertices.enumerate() {
        let genes = valid_leaves(tree, vertex.index(), params.max_length());
        if genes.is_empty() {
            continue;
        }

        let covered = distinct_taxa(&genes, taxa, params.missing_taxon())?;
        if covered.len() < params.required_taxa() {
            log::trace!(
                "Vertex {} covers {} of {} required taxa",
                vertex.index(),
                covered.len(),
                params.required_taxa()
            );
            continue;
        }

        candidates.push(Candidate::new(
            vertex.index(),
            rank,
            distances[vertex.index()],
            genes,
            covered,
        ));
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;
    use crate::orthogroup::distance::annotate_distances;

    fn taxa() -> TaxonMap {
        TaxonMap::from_pairs([("t1", "a1"), ("t1", "a2"), ("t2", "b1"), ("t3", "c1")]).unwrap()
    }

    #[test]
    fn test_distinct_taxa_policies() {
        let taxa = taxa();
        let genes = ["a1", "a2", "b1", "x", "y"];

        let excluded = distinct_taxa(&genes, &taxa, MissingTaxonPolicy::Exclude).unwrap();
        assert_eq!(excluded.len(), 2);

        let singleton = distinct_taxa(&genes, &taxa, MissingTaxonPolicy::Singleton).unwrap();
        assert_eq!(singleton.len(), 4);
        assert!(singleton.contains(&TaxonKey::Unmapped("x")));

        let rejected = distinct_taxa(&genes, &taxa, MissingTaxonPolicy::Reject);
        assert!(matches!(rejected, Err(Error::MissingTaxon(gene)) if gene == "x"));
    }

    #[test]
    fn test_candidates_in_post_order() {
        let tree = parse_str("(((a1:0.01,b1:0.01):0.01,c1:0.01):0.5,a2:0.01);").unwrap();
        let taxa = taxa();
        let distances = annotate_distances(&tree);
        let params = ClusterParams::default().with_required_taxa(2);

        let candidates = generate_candidates(&tree, &taxa, &distances, &params).unwrap();
        // root only reaches a2 (1 taxon), so two candidates remain
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].genes(), ["a1", "b1"]);
        assert_eq!(candidates[0].rank(), 0);
        assert_eq!(candidates[1].genes(), ["a1", "b1", "c1"]);
        assert_eq!(candidates[1].rank(), 1);
        assert_eq!(candidates[1].num_taxa(), 3);
        assert_eq!(candidates[1].origin_distance(), 0.5);
    }

    #[test]
    fn test_no_candidates_above_taxa_count() {
        let tree = parse_str("((a1:0.01,b1:0.01):0.01,c1:0.01);").unwrap();
        let taxa = taxa();
        let distances = annotate_distances(&tree);
        let params = ClusterParams::default().with_required_taxa(4);

        assert!(generate_candidates(&tree, &taxa, &distances, &params).unwrap().is_empty());
    }
}
