//! Scratch directory of a single reconstruction run.

use crate::reconstruction::error::ReconstructionError;
use std::path::{Path, PathBuf};
use tempfile::{Builder, TempDir};
use tracing::debug;

const WORKSPACE_PREFIX: &str = "ancestree-";

/// Bifurcating tree handed to the tool.
pub const ROOTED_TREE_FILE: &str = "rooted_tree.newick";
/// Reconstructed ancestor sequences converted to FASTA.
pub const INTERNAL_FASTA_FILE: &str = "internal.fasta";
/// Marginal ancestral states written by the tool.
pub const ANCESTRAL_STATES_FILE: &str = "RAxML_marginalAncestralStates.internal";
/// Tree with labeled internal vertices written by the tool.
pub const LABELLED_TREE_FILE: &str = "RAxML_nodeLabelledRootedTree.internal";

/// Uniquely named scratch directory, deleted when dropped unless
/// [kept](Self::keep).
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    /// Creates a new workspace directory inside `parent`.
    pub fn create_in(parent: &Path) -> Result<Self, ReconstructionError> {
        let dir = Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(parent)
            .map_err(|e| ReconstructionError::io("create workspace in", parent, e))?;
        debug!(path = %dir.path().display(), "created workspace");
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn rooted_tree_path(&self) -> PathBuf {
        self.path().join(ROOTED_TREE_FILE)
    }

    pub fn internal_fasta_path(&self) -> PathBuf {
        self.path().join(INTERNAL_FASTA_FILE)
    }

    pub fn ancestral_states_path(&self) -> PathBuf {
        self.path().join(ANCESTRAL_STATES_FILE)
    }

    pub fn labelled_tree_path(&self) -> PathBuf {
        self.path().join(LABELLED_TREE_FILE)
    }

    /// Deletes the workspace and everything in it, reporting failures.
    pub fn close(self) -> Result<(), ReconstructionError> {
        let path = self.path().to_path_buf();
        self.dir
            .close()
            .map_err(|e| ReconstructionError::io("remove workspace", &path, e))?;
        debug!(path = %path.display(), "removed workspace");
        Ok(())
    }

    /// Keeps the workspace on disk and returns its path.
    pub fn keep(self) -> PathBuf {
        self.dir.keep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_workspaces_are_unique_and_removed() {
        let parent = tempfile::tempdir().unwrap();
        let first = Workspace::create_in(parent.path()).unwrap();
        let second = Workspace::create_in(parent.path()).unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first.path().starts_with(parent.path()));

        fs::write(first.rooted_tree_path(), "(A,B);").unwrap();
        let first_path = first.path().to_path_buf();
        first.close().unwrap();
        assert!(!first_path.exists());

        let second_path = second.path().to_path_buf();
        drop(second);
        assert!(!second_path.exists());
    }

    #[test]
    fn test_keep_leaves_directory() {
        let parent = tempfile::tempdir().unwrap();
        let workspace = Workspace::create_in(parent.path()).unwrap();
        let kept = workspace.keep();
        assert!(kept.is_dir());
        assert_eq!(kept.parent(), Some(parent.path()));
    }

    #[test]
    fn test_file_names() {
        let parent = tempfile::tempdir().unwrap();
        let workspace = Workspace::create_in(parent.path()).unwrap();
        assert!(workspace.ancestral_states_path().ends_with("RAxML_marginalAncestralStates.internal"));
        assert!(workspace.labelled_tree_path().ends_with("RAxML_nodeLabelledRootedTree.internal"));
        assert!(workspace.internal_fasta_path().ends_with("internal.fasta"));
    }
}
