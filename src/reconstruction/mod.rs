//! Driving the external ancestral-sequence reconstruction tool.
//!
//! # Quick API
//! * [`AncestralReconstruction`] - a configured run, see [`AncestralReconstruction::run()`]
//! * [`ReconstructionConfig`] / [`load_config`] - settings, optionally from TOML
//! * [`ReconstructionCommand`] - the tool command line and its invocation
//! * [`Workspace`] - the scratch directory of a run

mod config;
mod error;
mod invoker;
mod pipeline;
mod workspace;

pub use config::{DEFAULT_COMMAND, ReconstructionConfig, load_config};
pub use error::{ReconstructionError, TOOL_FAILURE_MESSAGE};
pub use invoker::{QUIET_SUFFIX, RUN_ID, ReconstructionCommand, RunResult};
pub use pipeline::{AncestralReconstruction, ReconstructionReport};
pub use workspace::{ANCESTRAL_STATES_FILE, INTERNAL_FASTA_FILE, LABELLED_TREE_FILE, ROOTED_TREE_FILE, Workspace};
