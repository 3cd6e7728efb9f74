//! Subprocess boundary for Git invocations.
//!
//! Everything this crate learns about a repository comes from running the
//! `git` command line tool. This module isolates that fact behind the
//! [`GitExecutor`] trait so the parsing and resolution logic can be tested
//! against scripted output, and normalizes "blocking command execution"
//! into the typed [`GitOutput`] result.

use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, warn};

/// The outcome of one Git invocation.
///
/// `succeeded` reflects the process exit status; `lines` holds standard
/// output split into lines, captured even on failure so callers can log
/// it. Raw subprocess detail (exit codes, stderr) stays on this side of
/// the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Whether the command exited with status zero.
    pub succeeded: bool,
    /// Standard output, one entry per line, without trailing newlines.
    pub lines: Vec<String>,
}

impl GitOutput {
    /// Creates a successful result carrying the given output lines.
    pub fn success(lines: Vec<String>) -> Self {
        Self {
            succeeded: true,
            lines,
        }
    }

    /// Creates a failed result with no output.
    pub fn failure() -> Self {
        Self {
            succeeded: false,
            lines: Vec::new(),
        }
    }

    /// The first output line, for commands that answer with one scalar.
    ///
    /// Returns `None` for failed invocations and for successful ones that
    /// printed nothing useful, so callers can treat "command failed" and
    /// "command had no answer" uniformly.
    ///
    /// # Example
    ///
    /// ```
    /// use git_permalink_core::GitOutput;
    ///
    /// let output = GitOutput::success(vec!["abc123".to_string()]);
    /// assert_eq!(output.first_line(), Some("abc123"));
    /// assert_eq!(GitOutput::failure().first_line(), None);
    /// ```
    pub fn first_line(&self) -> Option<&str> {
        if !self.succeeded {
            return None;
        }
        self.lines
            .first()
            .map(String::as_str)
            .filter(|line| !line.is_empty())
    }
}

/// Capability to run Git commands against the repository under inspection.
///
/// Implementations must be synchronous: `run` returns only once the
/// command has finished. The inspector, resolver, selector, and assembler
/// all take `&dyn GitExecutor`, so hosts can substitute their own
/// transport (a test double, a daemon connection) without touching the
/// resolution logic.
pub trait GitExecutor {
    /// Runs `git` with the given arguments and captures the outcome.
    ///
    /// Invocation failures (binary missing, spawn errors) are absorbed
    /// into a failed [`GitOutput`]; this method does not return errors.
    fn run(&self, args: &[&str]) -> GitOutput;
}

/// [`GitExecutor`] backed by the system `git` binary.
///
/// # Example
///
/// ```no_run
/// use git_permalink_core::{CliGitExecutor, GitExecutor};
///
/// let git = CliGitExecutor::in_dir("/path/to/repo");
/// let output = git.run(&["remote"]);
/// for remote in &output.lines {
///     println!("{remote}");
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct CliGitExecutor {
    work_dir: Option<PathBuf>,
}

impl CliGitExecutor {
    /// Creates an executor that runs Git in the current working directory.
    pub fn new() -> Self {
        Self { work_dir: None }
    }

    /// Creates an executor that runs Git in the given directory.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: Some(dir.into()),
        }
    }
}

impl GitExecutor for CliGitExecutor {
    fn run(&self, args: &[&str]) -> GitOutput {
        debug!("running: git {}", args.join(" "));

        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.work_dir {
            command.current_dir(dir);
        }

        match command.output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let lines: Vec<String> = stdout.lines().map(str::to_string).collect();
                let succeeded = output.status.success();
                if !succeeded {
                    debug!("git {} exited with {}", args.join(" "), output.status);
                }
                let stderr = String::from_utf8_lossy(&output.stderr);
                if !stderr.is_empty() {
                    debug!("git stderr: {}", stderr.trim_end());
                }
                GitOutput { succeeded, lines }
            }
            Err(e) => {
                // A missing binary or bad working directory is reported the
                // same way as a failing command.
                warn!("could not invoke git: {e}");
                GitOutput::failure()
            }
        }
    }
}
