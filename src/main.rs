//! Command-line entry point: reconstructs ancestral sequences for the given
//! alignment and tree.

mod cli;
mod logging;

use ancestree::reconstruction::{AncestralReconstruction, ReconstructionConfig, load_config};
use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::Cli;
use tracing::info;

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                bail!("config file {} not found", path.display());
            }
            load_config(path).with_context(|| format!("load config {}", path.display()))?
        }
        None => ReconstructionConfig::default(),
    };
    let config = cli.override_config(config);

    let report = AncestralReconstruction::new(
        &cli.alignment,
        &cli.tree,
        &cli.output_alignment,
        &cli.output_tree,
        config,
    )
    .run()?;

    info!(
        inserted_vertices = report.inserted_vertices,
        input_records = report.input_records,
        reconstructed_records = report.reconstructed_records,
        labelled_tree_moved = report.labelled_tree_moved,
        "reconstruction finished"
    );
    if let Some(path) = &report.kept_workspace {
        eprintln!("Workspace kept at {}", path.display());
    }
    Ok(())
}
