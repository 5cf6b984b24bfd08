//! Greedy resolution of overlapping candidates into disjoint orthogroups.

use crate::error::Result;
use crate::model::{TaxonMap, VertexIndex};
use crate::orthogroup::candidate::{Candidate, TaxonKey, distinct_taxa};
use crate::orthogroup::params::ClusterParams;
use std::collections::{BTreeSet, HashSet};

/// A committed cluster of genes.
///
/// Orthogroups returned by one [resolve_clusters] call never share a gene.
#[derive(Debug, Clone, PartialEq)]
pub struct Orthogroup<'a> {
    origin: VertexIndex,
    origin_distance: f64,
    genes: Vec<&'a str>,
    taxa: BTreeSet<TaxonKey<'a>>,
}

impl<'a> Orthogroup<'a> {
    /// Index of the vertex the orthogroup's candidate came from.
    pub fn origin(&self) -> VertexIndex {
        self.origin
    }

    /// Distance of the origin from the root.
    pub fn origin_distance(&self) -> f64 {
        self.origin_distance
    }

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

/// Resolves candidates into disjoint [Orthogroup]s, in commit order.
///
/// Candidates are visited largest first, ties going to the lower
/// [rank](Candidate::rank). Genes already taken by an earlier orthogroup are
/// removed from each candidate; the remainder is committed only if it still
/// covers the required number of taxa.
///
/// # Errors
/// [Error::MissingTaxon](crate::Error::MissingTaxon) under
/// [MissingTaxonPolicy::Reject](crate::orthogroup::MissingTaxonPolicy::Reject).
pub fn resolve_clusters<'a>(
    mut candidates: Vec<Candidate<'a>>,
    taxa: &'a TaxonMap,
    params: &ClusterParams,
) -> Result<Vec<Orthogroup<'a>>> {
    candidates.sort_by(|a, b| b.size().cmp(&a.size()).then(a.rank().cmp(&b.rank())));

    let mut occupied: HashSet<&'a str> = HashSet::new();
    let mut orthogroups = Vec::new();

    for candidate in candidates {
        let new_genes: Vec<&'a str> = candidate
            .genes()
            .iter()
            .copied()
            .filter(|gene| !occupied.contains(gene))
            .collect();
        if new_genes.is_empty() {
            continue;
        }

        let covered = distinct_taxa(&new_genes, taxa, params.missing_taxon())?;
        if covered.len() < params.required_taxa() {
            log::trace!(
                "Dropping residual of vertex {}: {} genes cover {} taxa",
                candidate.origin(),
                new_genes.len(),
                covered.len()
            );
            continue;
        }

        occupied.extend(new_genes.iter().copied());
        orthogroups.push(Orthogroup {
            origin: candidate.origin(),
            origin_distance: candidate.origin_distance(),
            genes: new_genes,
            taxa: covered,
        });
    }

    Ok(orthogroups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orthogroup::params::MissingTaxonPolicy;

    fn candidate<'a>(
        taxa: &'a TaxonMap,
        origin: VertexIndex,
        rank: usize,
        genes: Vec<&'a str>,
    ) -> Candidate<'a> {
        let covered = distinct_taxa(&genes, taxa, MissingTaxonPolicy::Exclude).unwrap();
        Candidate::new(origin, rank, 0.0, genes, covered)
    }

    fn one_taxon_per_gene() -> TaxonMap {
        TaxonMap::from_pairs(
            ["a", "b", "c", "d", "e", "f", "g"].map(|gene| (format!("t_{}", gene), gene)),
        )
        .unwrap()
    }

    #[test]
    fn test_residual_below_threshold_is_dropped() {
        let taxa = one_taxon_per_gene();
        let params = ClusterParams::default().with_required_taxa(2);
        let small = candidate(&taxa, 1, 0, vec!["a", "b", "c"]);
        let large = candidate(&taxa, 2, 1, vec!["a", "b", "d", "e", "f"]);

        let orthogroups = resolve_clusters(vec![small, large], &taxa, &params).unwrap();
        assert_eq!(orthogroups.len(), 1);
        assert_eq!(orthogroups[0].genes(), ["a", "b", "d", "e", "f"]);
        assert_eq!(orthogroups[0].origin(), 2);
    }

    #[test]
    fn test_residual_above_threshold_is_committed() {
        let taxa = one_taxon_per_gene();
        let params = ClusterParams::default().with_required_taxa(2);
        let large = candidate(&taxa, 0, 0, vec!["a", "b", "c", "d"]);
        let overlapping = candidate(&taxa, 1, 1, vec!["d", "e", "f"]);

        let orthogroups = resolve_clusters(vec![large, overlapping], &taxa, &params).unwrap();
        assert_eq!(orthogroups.len(), 2);
        assert_eq!(orthogroups[1].genes(), ["e", "f"]);
        assert_eq!(orthogroups[1].num_taxa(), 2);
    }

    #[test]
    fn test_equal_sizes_resolved_by_rank() {
        let taxa = one_taxon_per_gene();
        let params = ClusterParams::default().with_required_taxa(2);
        let later = candidate(&taxa, 7, 5, vec!["b", "c"]);
        let earlier = candidate(&taxa, 3, 2, vec!["a", "b"]);

        let orthogroups = resolve_clusters(vec![later, earlier], &taxa, &params).unwrap();
        assert_eq!(orthogroups.len(), 1);
        assert_eq!(orthogroups[0].genes(), ["a", "b"]);
    }

    #[test]
    fn test_fully_covered_candidate_is_skipped() {
        let taxa = one_taxon_per_gene();
        let params = ClusterParams::default().with_required_taxa(1);
        let outer = candidate(&taxa, 0, 1, vec!["a", "b", "c"]);
        let inner = candidate(&taxa, 1, 0, vec!["a", "b"]);

        let orthogroups = resolve_clusters(vec![inner, outer], &taxa, &params).unwrap();
        assert_eq!(orthogroups.len(), 1);
        assert_eq!(orthogroups[0].size(), 3);
    }
}
