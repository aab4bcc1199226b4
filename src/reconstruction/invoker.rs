//! Building and running the external reconstruction command.

use crate::reconstruction::error::ReconstructionError;
use chrono::Utc;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};
use wait_timeout::ChildExt;

/// Run identifier passed to the tool; it names the tool's output files.
pub const RUN_ID: &str = "internal";

/// Appended to the command line in verbose mode.
pub const QUIET_SUFFIX: &str = "> /dev/null 2>&1";

/// Outcome of a finished tool run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
    pub timed_out: bool,
}

/// The tool command line: `<prefix> -s <alignment> -t <tree> -n internal`.
///
/// # Example
/// ```
/// use ancestree::reconstruction::ReconstructionCommand;
///
/// let command = ReconstructionCommand::new("raxmlHPC -f A -p 1 -m GTRGAMMA", "/data/aln.fa", "/tmp/ws/rooted_tree.newick");
/// assert_eq!(
///     command.command_line(),
///     "raxmlHPC -f A -p 1 -m GTRGAMMA -s /data/aln.fa -t /tmp/ws/rooted_tree.newick -n internal"
/// );
/// assert!(command.verbose(true).command_line().ends_with("-n internal > /dev/null 2>&1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructionCommand {
    prefix: String,
    alignment: PathBuf,
    tree: PathBuf,
    verbose: bool,
}

impl ReconstructionCommand {
    pub fn new(prefix: impl Into<String>, alignment: impl Into<PathBuf>, tree: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
            alignment: alignment.into(),
            tree: tree.into(),
            verbose: false,
        }
    }

    /// Verbose mode logs the command line and a finishing timestamp and
    /// discards the tool's own output.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns the shell command line.
    pub fn command_line(&self) -> String {
        let mut line = format!(
            "{} -s {} -t {} -n {RUN_ID}",
            self.prefix.trim(),
            shell_escape(&self.alignment.to_string_lossy()),
            shell_escape(&self.tree.to_string_lossy()),
        );
        if self.verbose {
            line.push(' ');
            line.push_str(QUIET_SUFFIX);
        }
        line
    }

    /// Runs the command through `sh` with `workspace` as working directory
    /// and waits for it, at most `timeout` if given.
    ///
    /// The working directory of the calling process is left alone. With a
    /// timeout, the shell gets its own process group and on expiry the whole
    /// group is killed, including tools the shell started as children.
    ///
    /// # Errors
    /// * [ExternalToolLaunch](ReconstructionError::ExternalToolLaunch) if
    ///   the shell cannot be started
    /// * [ExternalToolFailure](ReconstructionError::ExternalToolFailure) on
    ///   a non-zero exit status or timeout
    #[instrument(skip_all, fields(workspace = %workspace.display()))]
    pub fn invoke(&self, workspace: &Path, timeout: Option<Duration>) -> Result<RunResult, ReconstructionError> {
        let command_line = self.command_line();
        if self.verbose {
            info!(command = %command_line, "running reconstruction tool");
        } else {
            debug!(command = %command_line, "running reconstruction tool");
        }

        let started = Instant::now();
        let mut command = Command::new("sh");
        command
            .arg("-c")
            .arg(&command_line)
            .current_dir(workspace)
            .stdin(Stdio::null());
        #[cfg(unix)]
        if timeout.is_some() {
            use std::os::unix::process::CommandExt;
            // Leader of a new group, so a timeout can kill the tool with it
            command.process_group(0);
        }
        let mut child = command
            .spawn()
            .map_err(|source| {
                error!(err = %source, "failed to spawn reconstruction tool");
                ReconstructionError::ExternalToolLaunch {
                    command: command_line.clone(),
                    source,
                }
            })?;

        let (status, timed_out) = match timeout {
            None => (
                child
                    .wait()
                    .map_err(|e| ReconstructionError::io("wait for tool in", workspace, e))?,
                false,
            ),
            Some(limit) => match child
                .wait_timeout(limit)
                .map_err(|e| ReconstructionError::io("wait for tool in", workspace, e))?
            {
                Some(status) => (status, false),
                None => {
                    warn!(timeout_secs = limit.as_secs(), "reconstruction tool timed out, killing");
                    kill_tool(&mut child).map_err(|e| ReconstructionError::io("kill tool in", workspace, e))?;
                    let status = child
                        .wait()
                        .map_err(|e| ReconstructionError::io("wait for tool in", workspace, e))?;
                    (status, true)
                }
            },
        };

        let result = RunResult {
            exit_code: status.code(),
            elapsed: started.elapsed(),
            timed_out,
        };
        if self.verbose {
            info!(timestamp = Utc::now().timestamp(), "reconstruction tool finished");
        }
        debug!(exit_code = ?result.exit_code, elapsed_ms = result.elapsed.as_millis() as u64, timed_out, "tool exited");

        check_status(&command_line, status, result)
    }
}

/// Kills the process group led by `child`, falling back to killing
/// only `child` if the group cannot be signalled.
#[cfg(unix)]
fn kill_tool(child: &mut Child) -> io::Result<()> {
    let group = format!("-{}", child.id());
    let killed_group = Command::new("kill")
        .args(["-s", "KILL", "--", group.as_str()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    if killed_group {
        return Ok(());
    }

    warn!(pid = child.id(), "could not kill process group, killing shell only");
    child.kill()
}

#[cfg(not(unix))]
fn kill_tool(child: &mut Child) -> io::Result<()> {
    child.kill()
}

fn check_status(command_line: &str, status: ExitStatus, result: RunResult) -> Result<RunResult, ReconstructionError> {
    if status.success() && !result.timed_out {
        return Ok(result);
    }

    error!(
        command = %command_line,
        exit_code = ?result.exit_code,
        timed_out = result.timed_out,
        "reconstruction tool failed"
    );
    Err(ReconstructionError::ExternalToolFailure {
        command: command_line.to_string(),
        exit_code: result.exit_code,
        timed_out: result.timed_out,
    })
}

/// Single-quotes `input` for `sh` unless it only contains safe characters.
fn shell_escape(input: &str) -> String {
    if !input.is_empty()
        && input
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '/' | ':' | '+' | '='))
    {
        return input.to_string();
    }
    let mut escaped = String::from("'");
    for ch in input.chars() {
        if ch == '\'' {
            escaped.push_str("'\"'\"'");
        } else {
            escaped.push(ch);
        }
    }
    escaped.push('\'');
    escaped
}
