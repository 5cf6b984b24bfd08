mod cli;

use allelog::model::TaxonMap;
use allelog::newick;
use allelog::orthogroup::{self, ClusterParams};
use clap::Parser;
use std::fs::File;

fn main() {
    let args = cli::Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: cli::Args) -> allelog::Result<()> {
    let mut params = ClusterParams::default()
        .with_max_length(args.max_length)
        .with_required_taxa(args.required_taxa)
        .with_missing_taxon(args.missing_taxon);
    if let Some(label) = args.reroot {
        params = params.with_reroot(label);
    }

    log::info!("Reading tree from {}", args.tree_file.display());
    let mut tree = newick::parse_file(&args.tree_file)?;
    log::info!("Reading taxa from {}", args.taxa_file.display());
    let taxa = TaxonMap::from_file(&args.taxa_file)?;

    let assignment = orthogroup::extract_orthogroups(&mut tree, &taxa, &params)?;

    if let Some(path) = args.write_tree {
        newick::write_newick(File::create(&path)?, &tree)?;
        log::info!("Wrote tree to {}", path.display());
    }

    match args.output_file {
        Some(path) => {
            orthogroup::write_assignment_file(&path, &assignment)?;
            log::info!("Wrote orthogroups to {}", path.display());
        }
        None => orthogroup::write_assignment(std::io::stdout().lock(), &assignment)?,
    }

    Ok(())
}
