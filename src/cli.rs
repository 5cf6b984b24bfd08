use allelog::orthogroup::MissingTaxonPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Gene tree in Newick format
    pub tree_file: PathBuf,

    /// Tab-separated taxon table (taxon, gene per line)
    pub taxa_file: PathBuf,

    /// Orthogroup table to write (default: stdout)
    #[arg(short = 'o', long = "output")]
    pub output_file: Option<PathBuf>,

    /// Maximum branch length budget below a common ancestor
    #[arg(short = 'l', long, default_value = "0.1")]
    pub max_length: f64,

    /// Minimum number of distinct taxa per orthogroup
    #[arg(short = 't', long, default_value = "4")]
    pub required_taxa: usize,

    /// Label of the vertex to reroot at before clustering
    #[arg(short = 'r', long)]
    pub reroot: Option<String>,

    /// Treatment of genes without taxon: exclude, singleton or reject
    #[arg(long, default_value = "exclude")]
    pub missing_taxon: MissingTaxonPolicy,

    /// Also write the (rerooted) tree in Newick format
    #[arg(long)]
    pub write_tree: Option<PathBuf>,

    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
