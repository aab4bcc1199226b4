//! Error type of the reconstruction pipeline.

use crate::model::VertexIndex;
use crate::newick::UnwritableLabelError;
use crate::parser::ParsingError;
use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Diagnostic reported whenever the external reconstruction tool cannot be
/// run successfully.
pub const TOOL_FAILURE_MESSAGE: &str =
    "Something went wrong while creating the ancestor sequences using the reconstruction tool";

/// Errors that abort a reconstruction run.
#[derive(Debug)]
pub enum ReconstructionError {
    /// A filesystem operation failed.
    Io {
        action: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// A tree, alignment or state table could not be parsed.
    Parsing { path: PathBuf, source: ParsingError },
    /// A vertex still has a child count other than 0 or 2 after
    /// rebinarization (unary vertex).
    NonBifurcatingTree {
        vertex: VertexIndex,
        label: Option<String>,
        num_children: usize,
    },
    /// A label cannot be handed to the tool as plain Newick.
    UnwritableLabel(UnwritableLabelError),
    /// The tool could not be started.
    ExternalToolLaunch { command: String, source: io::Error },
    /// The tool exited unsuccessfully or timed out.
    ExternalToolFailure {
        command: String,
        exit_code: Option<i32>,
        timed_out: bool,
    },
    /// Configuration values are invalid or unreadable.
    InvalidConfig(String),
}

impl ReconstructionError {
    /// Returns `true` for errors caused by the external tool (launch failure,
    /// non-zero exit or timeout).
    pub fn is_external_tool_failure(&self) -> bool {
        matches!(
            self,
            ReconstructionError::ExternalToolLaunch { .. } | ReconstructionError::ExternalToolFailure { .. }
        )
    }

    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        ReconstructionError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parsing(path: impl Into<PathBuf>, source: ParsingError) -> Self {
        ReconstructionError::Parsing {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for ReconstructionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReconstructionError::Io { action, path, .. } => write!(f, "Failed to {action} '{}'", path.display()),
            ReconstructionError::Parsing { path, .. } => write!(f, "Failed to parse '{}'", path.display()),
            ReconstructionError::NonBifurcatingTree {
                vertex,
                label,
                num_children,
            } => {
                write!(f, "Tree is not bifurcating: vertex {vertex}")?;
                if let Some(label) = label {
                    write!(f, " ('{label}')")?;
                }
                write!(f, " has {num_children} child(ren)")
            }
            ReconstructionError::UnwritableLabel(err) => write!(f, "Cannot write tree for reconstruction: {err}"),
            ReconstructionError::ExternalToolLaunch { .. } | ReconstructionError::ExternalToolFailure { .. } => {
                f.write_str(TOOL_FAILURE_MESSAGE)
            }
            ReconstructionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl Error for ReconstructionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReconstructionError::Io { source, .. } => Some(source),
            ReconstructionError::Parsing { source, .. } => Some(source),
            ReconstructionError::UnwritableLabel(err) => Some(err),
            ReconstructionError::ExternalToolLaunch { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<UnwritableLabelError> for ReconstructionError {
    fn from(err: UnwritableLabelError) -> Self {
        ReconstructionError::UnwritableLabel(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_failure_message_is_fixed() {
        let err = ReconstructionError::ExternalToolFailure {
            command: "false".to_string(),
            exit_code: Some(3),
            timed_out: false,
        };
        assert_eq!(err.to_string(), TOOL_FAILURE_MESSAGE);
        assert!(err.is_external_tool_failure());
    }

    #[test]
    fn test_launch_failure_keeps_source() {
        let err = ReconstructionError::ExternalToolLaunch {
            command: "missing-tool".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), TOOL_FAILURE_MESSAGE);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_non_bifurcating_display() {
        let err = ReconstructionError::NonBifurcatingTree {
            vertex: 4,
            label: Some("Node2".to_string()),
            num_children: 1,
        };
        assert_eq!(err.to_string(), "Tree is not bifurcating: vertex 4 ('Node2') has 1 child(ren)");
        assert!(!err.is_external_tool_failure());
    }
}
