//! Final labelling of every gene of a tree.

use crate::model::Tree;
use crate::orthogroup::resolver::Orthogroup;
use std::collections::HashMap;
use std::fmt::{self, Display};

/// Label written for genes in no orthogroup
pub const UNASSIGNED_LABEL: &str = "non_OG";

/// Prefix of orthogroup labels, followed by the 1-based orthogroup number
pub const ORTHOGROUP_PREFIX: &str = "OG";

/// Orthogroup membership of a gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Member of the n-th committed orthogroup (1-based)
    Orthogroup(usize),
    Unassigned,
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Orthogroup(n) => write!(f, "{}{}", ORTHOGROUP_PREFIX, n),
            Label::Unassigned => f.write_str(UNASSIGNED_LABEL),
        }
    }
}

// =#========================================================================#=
// ASSIGNMENT
// =#========================================================================#=
/// Every leaf gene of a tree with exactly one [Label].
///
/// Entries list the orthogroups first, in commit order with each one's genes
/// in leaf order, followed by the unassigned genes in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    entries: Vec<(String, Label)>,
    position_by_gene: HashMap<String, usize>,
    num_orthogroups: usize,
}

impl Assignment {
    /// Returns all `(gene, label)` entries in assignment order.
    pub fn entries(&self) -> &[(String, Label)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Label)> {
        self.entries.iter().map(|(gene, label)| (gene.as_str(), *label))
    }

    /// Returns the label of `gene`, or `None` if it is no leaf of the tree.
    pub fn label_of(&self, gene: &str) -> Option<Label> {
        self.position_by_gene
            .get(gene)
            .map(|&position| self.entries[position].1)
    }

    /// Returns the genes of orthogroup `n` (1-based), empty if there is none.
    pub fn orthogroup(&self, n: usize) -> Vec<&str> {
        self.iter()
            .filter(|(_, label)| *label == Label::Orthogroup(n))
            .map(|(gene, _)| gene)
            .collect()
    }

    pub fn num_orthogroups(&self) -> usize {
        self.num_orthogroups
    }

    /// Number of genes in some orthogroup.
    pub fn num_assigned(&self) -> usize {
        self.entries.len() - self.num_unassigned()
    }

    /// Number of genes labelled [Label::Unassigned].
    pub fn num_unassigned(&self) -> usize {
        self.entries
            .iter()
            .filter(|(_, label)| *label == Label::Unassigned)
            .count()
    }

    /// Number of entries, i.e. the number of leaves of the tree.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Labels the genes of `orthogroups` `OG1, OG2, ...` in the given order and
/// every other leaf of `tree` as [Label::Unassigned].
pub fn assign_labels(tree: &Tree, orthogroups: &[Orthogroup<'_>]) -> Assignment {
    let mut entries = Vec::with_capacity(tree.num_leaves());
    let mut position_by_gene = HashMap::with_capacity(tree.num_leaves());

    for (i, orthogroup) in orthogroups.iter().enumerate() {
        let label = Label::Orthogroup(i + 1);
        for &gene in orthogroup.genes() {
            position_by_gene.insert(gene.to_string(), entries.len());
            entries.push((gene.to_string(), label));
        }
    }

    for gene in tree.leaf_labels() {
        if !position_by_gene.contains_key(gene) {
            position_by_gene.insert(gene.to_string(), entries.len());
            entries.push((gene.to_string(), Label::Unassigned));
        }
    }

    Assignment {
        entries,
        position_by_gene,
        num_orthogroups: orthogroups.len(),
    }
}
