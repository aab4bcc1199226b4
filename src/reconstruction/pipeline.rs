//! Orchestration of a complete reconstruction run.
//!
//! A run moves through these stages in order:
//! 1. The input tree is read, rebinarized and written into a fresh workspace
//! 2. The reconstruction tool runs inside the workspace
//! 3. Its ancestral state table is converted to FASTA
//! 4. Input alignment and ancestor sequences are combined into the output
//! 5. The tool's labeled tree (if any) is moved to the output tree path
//! 6. The workspace is removed
//!
//! Each completed stage is logged. Any error ends the run and the last
//! stage reached is logged with it; the workspace is released on every path
//! and the working directory of the process is never changed.

use crate::alignment::{self, Alignment, FastaWriter, fasta, merge};
use crate::newick::{self, NewickStyle, to_newick};
use crate::reconstruction::config::ReconstructionConfig;
use crate::reconstruction::error::ReconstructionError;
use crate::reconstruction::invoker::ReconstructionCommand;
use crate::reconstruction::workspace::Workspace;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Progress of a reconstruction run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Init,
    TreeRooted,
    ReconstructionRan,
    StatesConverted,
    AlignmentsCombined,
    TreeFinalized,
    WorkspaceCleaned,
}

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionReport {
    /// Vertices inserted to make the input tree bifurcating.
    pub inserted_vertices: usize,
    /// Records of the input alignment.
    pub input_records: usize,
    /// Ancestor records added by the tool.
    pub reconstructed_records: usize,
    /// Whether the tool's labeled tree was moved to the output tree path.
    pub labelled_tree_moved: bool,
    /// Workspace location if it was kept.
    pub kept_workspace: Option<PathBuf>,
}

impl ReconstructionReport {
    fn new() -> Self {
        Self {
            inserted_vertices: 0,
            input_records: 0,
            reconstructed_records: 0,
            labelled_tree_moved: false,
            kept_workspace: None,
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    *stage = next;
    info!(stage = ?next, "reconstruction stage completed");
}

/// A configured reconstruction run.
///
/// # Example
/// ```no_run
/// use ancestree::reconstruction::{AncestralReconstruction, ReconstructionConfig};
///
/// let report = AncestralReconstruction::new(
///     "snps.aln",
///     "snps.tre",
///     "snps.joint.aln",
///     "snps.joint.tre",
///     ReconstructionConfig::default(),
/// )
/// .run()?;
/// println!("{} ancestor sequences", report.reconstructed_records);
/// # Ok::<(), ancestree::reconstruction::ReconstructionError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AncestralReconstruction {
    alignment: PathBuf,
    tree: PathBuf,
    output_alignment: PathBuf,
    output_tree: PathBuf,
    config: ReconstructionConfig,
}

impl AncestralReconstruction {
    pub fn new(
        alignment: impl Into<PathBuf>,
        tree: impl Into<PathBuf>,
        output_alignment: impl Into<PathBuf>,
        output_tree: impl Into<PathBuf>,
        config: ReconstructionConfig,
    ) -> Self {
        Self {
            alignment: alignment.into(),
            tree: tree.into(),
            output_alignment: output_alignment.into(),
            output_tree: output_tree.into(),
            config,
        }
    }

    pub fn config(&self) -> &ReconstructionConfig {
        &self.config
    }

    /// Runs all stages.
    ///
    /// # Errors
    /// The first [ReconstructionError] of any stage. The output alignment is
    /// only written once the tool succeeded.
    #[instrument(skip_all, fields(alignment = %self.alignment.display(), tree = %self.tree.display()))]
    pub fn run(&self) -> Result<ReconstructionReport, ReconstructionError> {
        self.config.validate()?;

        let parent = match &self.config.workspace_parent {
            Some(parent) => parent.clone(),
            None => env::current_dir().map_err(|e| ReconstructionError::io("resolve", ".", e))?,
        };
        let workspace = Workspace::create_in(&parent)?;

        let mut report = ReconstructionReport::new();
        let mut stage = Stage::Init;
        let outcome = self.run_stages(&workspace, &mut report, &mut stage);

        if let Err(err) = &outcome {
            error!(stage = ?stage, err = %err, "reconstruction failed");
        }

        if self.config.keep_workspace {
            let path = workspace.keep();
            info!(path = %path.display(), "keeping workspace");
            report.kept_workspace = Some(path);
        } else if outcome.is_ok() {
            workspace.close()?;
        } else if let Err(close_err) = workspace.close() {
            warn!(err = %close_err, "failed to remove workspace after error");
        }

        outcome?;
        advance(&mut stage, Stage::WorkspaceCleaned);
        Ok(report)
    }

    fn run_stages(
        &self,
        workspace: &Workspace,
        report: &mut ReconstructionReport,
        stage: &mut Stage,
    ) -> Result<(), ReconstructionError> {
        let alignment_path = std::path::absolute(&self.alignment)
            .map_err(|e| ReconstructionError::io("resolve", &self.alignment, e))?;
        let input_alignment = fasta::read_file(&alignment_path)
            .map_err(|e| ReconstructionError::parsing(&alignment_path, e))?;

        let rooted_tree_path = workspace.rooted_tree_path();
        report.inserted_vertices = root_tree(&self.tree, &rooted_tree_path, &input_alignment)?;
        advance(stage, Stage::TreeRooted);

        ReconstructionCommand::new(&self.config.command, &alignment_path, &rooted_tree_path)
            .verbose(self.config.verbose)
            .invoke(workspace.path(), self.config.timeout())?;
        advance(stage, Stage::ReconstructionRan);

        let states_path = workspace.ancestral_states_path();
        let internal_fasta_path = workspace.internal_fasta_path();
        alignment::convert_ancestral_states(&states_path, &internal_fasta_path)
            .map_err(|e| ReconstructionError::parsing(&states_path, e))?;
        advance(stage, Stage::StatesConverted);

        let ancestors = fasta::read_file(&internal_fasta_path)
            .map_err(|e| ReconstructionError::parsing(&internal_fasta_path, e))?;
        report.input_records = input_alignment.len();
        report.reconstructed_records = ancestors.len();
        let combined = merge(input_alignment, ancestors);
        FastaWriter::with_line_width(self.config.fasta_line_width)
            .write_file(&self.output_alignment, &combined)
            .map_err(|e| ReconstructionError::io("write", &self.output_alignment, e))?;
        debug!(records = combined.len(), path = %self.output_alignment.display(), "wrote combined alignment");
        advance(stage, Stage::AlignmentsCombined);

        let labelled_tree_path = workspace.labelled_tree_path();
        if labelled_tree_path.exists() {
            move_file(&labelled_tree_path, &self.output_tree)?;
            report.labelled_tree_moved = true;
        } else {
            info!("tool produced no labeled tree, skipping");
        }
        advance(stage, Stage::TreeFinalized);

        Ok(())
    }
}

/// Reads the first tree of `input`, makes it bifurcating and writes it as
/// plain Newick to `output`.
///
/// Leaves without a record in `alignment` are reported as warnings.
/// Returns the number of inserted vertices.
fn root_tree(input: &Path, output: &Path, alignment: &Alignment) -> Result<usize, ReconstructionError> {
    let mut tree = newick::parse_first_in_file(input).map_err(|e| ReconstructionError::parsing(input, e))?;

    let inserted = tree.rebinarize();
    if let Some(vertex) = tree.first_non_bifurcating() {
        return Err(ReconstructionError::NonBifurcatingTree {
            vertex: vertex.index(),
            label: vertex.label().map(str::to_string),
            num_children: vertex.num_children(),
        });
    }

    for label in tree.leaf_labels() {
        if alignment.get(label).is_none() {
            warn!(leaf = label, "leaf has no record in the input alignment");
        }
    }

    let mut newick = to_newick(&tree, NewickStyle::Plain)?;
    newick.push('\n');
    fs::write(output, newick).map_err(|e| ReconstructionError::io("write", output, e))?;
    debug!(inserted, leaves = tree.num_leaves(), path = %output.display(), "wrote bifurcating tree");

    Ok(inserted)
}

/// Moves `from` to `to`, copying across filesystems if renaming fails.
fn move_file(from: &Path, to: &Path) -> Result<(), ReconstructionError> {
    if let Err(rename_err) = fs::rename(from, to) {
        debug!(err = %rename_err, "rename failed, copying instead");
        fs::copy(from, to).map_err(|e| ReconstructionError::io("copy labeled tree to", to, e))?;
        fs::remove_file(from).map_err(|e| ReconstructionError::io("remove", from, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_tree_writes_plain_bifurcating_newick() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.newick");
        let output = dir.path().join("rooted_tree.newick");
        fs::write(&input, "('Apteryx owenii':1,Apteryx_haastii:2,Apteryx_rowi:3);\n").unwrap();

        let inserted = root_tree(&input, &output, &Alignment::new()).unwrap();
        assert_eq!(inserted, 1);
        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written, "(Apteryx_rowi:3,(Apteryx_owenii:1,Apteryx_haastii:2):0);\n");
        assert!(!written.contains('\''));
    }

    #[test]
    fn test_root_tree_rejects_unary_vertex() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.newick");
        fs::write(&input, "((A:1)X:1,B:2);").unwrap();

        let err = root_tree(&input, &dir.path().join("out.newick"), &Alignment::new()).unwrap_err();
        assert!(matches!(
            err,
            ReconstructionError::NonBifurcatingTree { num_children: 1, .. }
        ));
    }

    #[test]
    fn test_root_tree_rejects_structural_label() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.newick");
        fs::write(&input, "('A,1':1,B:2);").unwrap();

        let err = root_tree(&input, &dir.path().join("out.newick"), &Alignment::new()).unwrap_err();
        assert!(matches!(err, ReconstructionError::UnwritableLabel(_)));
    }

    #[test]
    fn test_move_file() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("from");
        let to = dir.path().join("to");
        fs::write(&from, "(A,B)ROOT;").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "(A,B)ROOT;");
    }
}
