//! Command-line arguments.

use ancestree::reconstruction::ReconstructionConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ancestree",
    version,
    about = "Reconstruct ancestral sequences on a rooted tree with an external tool"
)]
pub struct Cli {
    /// Input alignment (FASTA).
    #[arg(short, long)]
    pub alignment: PathBuf,

    /// Input rooted tree (Newick); leaf labels must match alignment names.
    #[arg(short, long)]
    pub tree: PathBuf,

    /// Output alignment: input records followed by ancestor sequences.
    #[arg(long)]
    pub output_alignment: PathBuf,

    /// Output tree with labeled internal vertices.
    #[arg(long)]
    pub output_tree: PathBuf,

    /// Command prefix of the reconstruction tool.
    #[arg(short, long)]
    pub command: Option<String>,

    /// TOML configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log the tool command line and silence the tool's output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Keep the scratch directory after the run.
    #[arg(long)]
    pub keep_workspace: bool,

    /// Kill the tool after this many seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Applies flags given on the command line on top of `config`.
    pub fn override_config(&self, mut config: ReconstructionConfig) -> ReconstructionConfig {
        if let Some(command) = &self.command {
            config.command = command.clone();
        }
        if self.verbose {
            config.verbose = true;
        }
        if self.keep_workspace {
            config.keep_workspace = true;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "ancestree",
            "--alignment",
            "snps.aln",
            "--tree",
            "snps.tre",
            "--output-alignment",
            "out.aln",
            "--output-tree",
            "out.tre",
            "--command",
            "raxmlHPC -f A -p 3 -m GTRCAT",
            "--timeout-secs",
            "60",
        ]);
        let config = cli.override_config(ReconstructionConfig {
            keep_workspace: true,
            ..ReconstructionConfig::default()
        });

        assert_eq!(config.command, "raxmlHPC -f A -p 3 -m GTRCAT");
        assert_eq!(config.timeout_secs, Some(60));
        assert!(config.keep_workspace);
        assert!(!config.verbose);
    }

    #[test]
    fn missing_required_argument() {
        let result = Cli::try_parse_from(["ancestree", "--alignment", "snps.aln"]);
        assert!(result.is_err());
    }
}
