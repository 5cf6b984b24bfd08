//! Configuration of an orthogroup extraction run.

use crate::error::{Error, Result};
use std::fmt::{self, Display};
use std::str::FromStr;

/// Default divergence cutoff on branch length sums
pub const DEFAULT_MAX_LENGTH: f64 = 0.1;

/// Default number of distinct taxa an orthogroup has to cover
pub const DEFAULT_REQUIRED_TAXA: usize = 4;

// =#========================================================================#=
// MISSING TAXON POLICY
// =#========================================================================#=
/// How genes without an entry in the [TaxonMap](crate::model::TaxonMap) are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTaxonPolicy {
    /// Gene can join an orthogroup but adds nothing to its taxon diversity.
    #[default]
    Exclude,
    /// Gene counts as a taxon of its own.
    Singleton,
    /// Abort with [Error::MissingTaxon].
    Reject,
}

impl Display for MissingTaxonPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingTaxonPolicy::Exclude => "exclude",
            MissingTaxonPolicy::Singleton => "singleton",
            MissingTaxonPolicy::Reject => "reject",
        };
        f.write_str(name)
    }
}

impl FromStr for MissingTaxonPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "exclude" => Ok(MissingTaxonPolicy::Exclude),
            "singleton" => Ok(MissingTaxonPolicy::Singleton),
            "reject" => Ok(MissingTaxonPolicy::Reject),
            other => Err(Error::InvalidParameter(format!(
                "unknown missing taxon policy '{}' (expected exclude, singleton or reject)",
                other
            ))),
        }
    }
}

// =#========================================================================#=
// CLUSTER PARAMS
// =#========================================================================#=
/// Parameters of orthogroup extraction.
///
/// # Configuration
/// * [`with_max_length(max_length)`](Self::with_max_length)
///     - Budget of branch length below a common ancestor (default `0.1`).
/// * [`with_required_taxa(required_taxa)`](Self::with_required_taxa)
///     - Minimum number of distinct taxa per orthogroup (default `4`).
/// * [`with_reroot(label)`](Self::with_reroot)
///     - Vertex to reroot at before clustering (default none).
/// * [`with_missing_taxon(policy)`](Self::with_missing_taxon)
///     - Treatment of genes without taxon (default [MissingTaxonPolicy::Exclude]).
///
/// # Example
/// ```
/// use allelog::orthogroup::{ClusterParams, MissingTaxonPolicy};
///
/// let params = ClusterParams::default()
///     .with_max_length(0.05)
///     .with_required_taxa(3)
///     .with_missing_taxon(MissingTaxonPolicy::Reject);
/// assert!(params.validate().is_ok());
/// assert!(ClusterParams::default().with_required_taxa(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterParams {
    max_length: f64,
    required_taxa: usize,
    reroot: Option<String>,
    missing_taxon: MissingTaxonPolicy,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            required_taxa: DEFAULT_REQUIRED_TAXA,
            reroot: None,
            missing_taxon: MissingTaxonPolicy::default(),
        }
    }
}

impl ClusterParams {
    pub fn with_max_length(mut self, max_length: f64) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_required_taxa(mut self, required_taxa: usize) -> Self {
        self.required_taxa = required_taxa;
        self
    }

    pub fn with_reroot<S: Into<String>>(mut self, label: S) -> Self {
        self.reroot = Some(label.into());
        self
    }

    pub fn with_missing_taxon(mut self, policy: MissingTaxonPolicy) -> Self {
        self.missing_taxon = policy;
        self
    }

    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    pub fn required_taxa(&self) -> usize {
        self.required_taxa
    }

    pub fn reroot(&self) -> Option<&str> {
        self.reroot.as_deref()
    }

    pub fn missing_taxon(&self) -> MissingTaxonPolicy {
        self.missing_taxon
    }

    /// Checks that all parameters are in range.
    ///
    /// # Errors
    /// [Error::InvalidParameter] if `max_length` is negative or not finite,
    /// or if `required_taxa` is 0.
    pub fn validate(&self) -> Result<()> {
        if !self.max_length.is_finite() || self.max_length < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "max length must be non-negative and finite, got {}",
                self.max_length
            )));
        }
        if self.required_taxa == 0 {
            return Err(Error::InvalidParameter(
                "required taxa must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
