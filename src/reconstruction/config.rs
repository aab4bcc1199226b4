//! Reconstruction settings, optionally read from a TOML file.
//!
//! ```toml
//! command = "raxmlHPC-PTHREADS -T 4 -f A -p 1 -m GTRGAMMA"
//! verbose = true
//! timeout_secs = 7200
//! fasta_line_width = 0
//! ```

use crate::alignment::fasta::DEFAULT_LINE_WIDTH;
use crate::reconstruction::error::ReconstructionError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Command prefix used when none is configured.
pub const DEFAULT_COMMAND: &str = "raxmlHPC -f A -p 1 -m GTRGAMMA";

/// Settings of a reconstruction run.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ReconstructionConfig {
    /// Command prefix of the reconstruction tool; input, tree and run
    /// identifier arguments are appended.
    pub command: String,

    /// Log the command line and a timestamp, and silence the tool's output.
    pub verbose: bool,

    /// Keep the scratch directory after the run.
    pub keep_workspace: bool,

    /// Directory in which the scratch directory is created
    /// (default: current working directory).
    pub workspace_parent: Option<PathBuf>,

    /// Kill the tool after this many seconds.
    pub timeout_secs: Option<u64>,

    /// Sequence line width of the combined alignment; `0` disables wrapping.
    pub fasta_line_width: usize,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            verbose: false,
            keep_workspace: false,
            workspace_parent: None,
            timeout_secs: None,
            fasta_line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl ReconstructionConfig {
    pub fn validate(&self) -> Result<(), ReconstructionError> {
        if self.command.trim().is_empty() {
            return Err(ReconstructionError::InvalidConfig("command must not be empty".to_string()));
        }
        if self.timeout_secs == Some(0) {
            return Err(ReconstructionError::InvalidConfig("timeout_secs must be > 0".to_string()));
        }
        match &self.workspace_parent {
            Some(parent) if !parent.is_dir() => {
                return Err(ReconstructionError::InvalidConfig(format!(
                    "workspace_parent '{}' is not a directory",
                    parent.display()
                )));
            }
            _ => {}
        }
        Ok(())
    }

    /// Returns the tool timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ReconstructionConfig::default()`.
pub fn load_config(path: &Path) -> Result<ReconstructionConfig, ReconstructionError> {
    if !path.exists() {
        return Ok(ReconstructionConfig::default());
    }
    let contents = fs::read_to_string(path).map_err(|e| ReconstructionError::io("read", path, e))?;
    let config: ReconstructionConfig = toml::from_str(&contents)
        .map_err(|e| ReconstructionError::InvalidConfig(format!("parse {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}
