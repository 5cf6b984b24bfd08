//! Gene to taxon assignment.
//!
//! - [TaxonMap]: read-only lookup of the taxon each gene (leaf label) belongs to,
//!   built once from `(taxon, gene)` pairs, e.g. read from a taxon table.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Character starting a comment line in a taxon table
const COMMENT_PREFIX: char = '#';

// =#========================================================================#=
// TAXON MAP
// =#========================================================================#=
/// Maps gene identifiers to taxon identifiers.
///
/// Each gene belongs to at most one taxon; inserting a gene a second time
/// with a different taxon is an error, repeating the same pair is fine.
///
/// # Example
/// ```
/// use allelog::model::TaxonMap;
///
/// let taxa = TaxonMap::from_pairs([
///     ("Arabidopsis", "AT1G01010"),
///     ("Arabidopsis", "AT1G01020"),
///     ("Brassica", "Bra000001"),
/// ]).unwrap();
///
/// assert_eq!(taxa.taxon_of("AT1G01020"), Some("Arabidopsis"));
/// assert_eq!(taxa.num_taxa(), 2);
/// assert_eq!(taxa.taxon_of("unknown"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaxonMap {
    /// Map from gene to its taxon
    taxon_by_gene: HashMap<String, String>,
}

impl TaxonMap {
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from `(taxon, gene)` pairs.
    ///
    /// # Errors
    /// [Error::ConflictingTaxon] if a gene is paired with two different taxa.
    pub fn from_pairs<I, T, G>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, G)>,
        T: Into<String>,
        G: Into<String>,
    {
        let mut map = Self::new();
        for (taxon, gene) in pairs {
            map.insert(taxon.into(), gene.into())?;
        }
        Ok(map)
    }

    /// Assigns `gene` to `taxon`.
    ///
    /// # Errors
    /// [Error::ConflictingTaxon] if `gene` is already assigned to another taxon.
    pub fn insert(&mut self, taxon: String, gene: String) -> Result<()> {
        match self.taxon_by_gene.entry(gene) {
            Entry::Vacant(entry) => {
                entry.insert(taxon);
                Ok(())
            }
            Entry::Occupied(entry) if *entry.get() == taxon => Ok(()),
            Entry::Occupied(entry) => Err(Error::ConflictingTaxon {
                gene: entry.key().clone(),
                first: entry.get().clone(),
                second: taxon,
            }),
        }
    }

    /// Returns the taxon of `gene`, or `None` if it has no assignment.
    pub fn taxon_of(&self, gene: &str) -> Option<&str> {
        self.taxon_by_gene.get(gene).map(String::as_str)
    }

    /// Checks whether `gene` has a taxon assigned.
    pub fn contains_gene(&self, gene: &str) -> bool {
        self.taxon_by_gene.contains_key(gene)
    }

    /// Returns the number of genes with an assignment.
    pub fn num_genes(&self) -> usize {
        self.taxon_by_gene.len()
    }

    /// Returns the number of distinct taxa.
    pub fn num_taxa(&self) -> usize {
        let mut taxa: Vec<&str> = self.taxon_by_gene.values().map(String::as_str).collect();
        taxa.sort_unstable();
        taxa.dedup();
        taxa.len()
    }

    /// Returns whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.taxon_by_gene.is_empty()
    }
}

// ============================================================================
// Taxon table parsing (pub)
// ============================================================================
impl TaxonMap {
    /// Parses a taxon table file.
    ///
    /// See [`TaxonMap::from_reader`] for the format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parses a taxon table given as string.
    ///
    /// See [`TaxonMap::from_reader`] for the format.
    pub fn parse_str(table: &str) -> Result<Self> {
        Self::from_reader(table.as_bytes())
    }

    /// Parses a tab-separated taxon table:
    /// ```text
    /// <taxon>\t<gene>
    /// ```
    /// Blank lines and lines starting with `#` are skipped,
    /// fields after the second are ignored.
    ///
    /// # Errors
    /// * [Error::TaxonTable] for a line with fewer than two (non-empty) fields
    /// * [Error::ConflictingTaxon] if a gene is listed with two different taxa
    /// * [Error::Io] if reading fails
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut map = Self::new();

        for (line_index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_number = line_index + 1;
            let content = line.trim_end_matches('\r');
            if content.trim().is_empty() || content.trim_start().starts_with(COMMENT_PREFIX) {
                continue;
            }

            let mut fields = content.split('\t').map(str::trim);
            let (Some(taxon), Some(gene)) = (fields.next(), fields.next()) else {
                return Err(Error::TaxonTable {
                    line: line_number,
                    msg: "expected '<taxon>\\t<gene>'".to_string(),
                });
            };
            if taxon.is_empty() || gene.is_empty() {
                return Err(Error::TaxonTable {
                    line: line_number,
                    msg: "empty taxon or gene field".to_string(),
                });
            }

            map.insert(taxon.to_string(), gene.to_string())?;
        }

        log::debug!(
            "Parsed taxon table with {} genes in {} taxa",
            map.num_genes(),
            map.num_taxa()
        );
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let table = "# taxon\tgene\nhuman\tH1\nhuman\tH2\n\nmouse\tM1\textra\n";
        let map = TaxonMap::parse_str(table).unwrap();
        assert_eq!(map.num_genes(), 3);
        assert_eq!(map.num_taxa(), 2);
        assert_eq!(map.taxon_of("M1"), Some("mouse"));
        assert!(map.contains_gene("H2"));
        assert!(!map.contains_gene("human"));
    }

    #[test]
    fn test_parse_rejects_single_column() {
        let result = TaxonMap::parse_str("human\tH1\nmouse\n");
        assert!(matches!(result, Err(Error::TaxonTable { line: 2, .. })));
    }

    #[test]
    fn test_parse_rejects_empty_field() {
        let result = TaxonMap::parse_str("human\t \n");
        assert!(matches!(result, Err(Error::TaxonTable { line: 1, .. })));
    }

    #[test]
    fn test_conflicting_taxon() {
        let result = TaxonMap::parse_str("human\tG1\nmouse\tG1\n");
        match result {
            Err(Error::ConflictingTaxon { gene, first, second }) => {
                assert_eq!(gene, "G1");
                assert_eq!(first, "human");
                assert_eq!(second, "mouse");
            }
            other => panic!("Expected conflicting taxon error, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_pair_is_tolerated() {
        let map = TaxonMap::from_pairs([("human", "G1"), ("human", "G1")]).unwrap();
        assert_eq!(map.num_genes(), 1);
    }
}
