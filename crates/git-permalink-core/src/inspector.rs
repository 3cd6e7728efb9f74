//! Read-only queries about the repository's remotes and tracked files.
//!
//! [`RemoteInspector`] wraps the handful of Git questions the assembler
//! and selector need: which remotes exist, where they point, what the
//! current branch tracks, and whether a file is visible at a revision.
//! Git failures surface as empty or absent results, never as errors.

use crate::error::{Error, Result};
use crate::executor::GitExecutor;

/// Tracking branch reported when none can actually be determined.
///
/// This is a deliberate default, not a detected truth: when the repository
/// uses a different default branch, the value is simply wrong, and callers
/// must treat it as a guess. Kept as a named constant so the guess is
/// visible at every use site.
pub const TRACKING_BRANCH_FALLBACK: &str = "origin/master";

/// Read-only view of a repository's remote configuration.
///
/// # Example
///
/// ```no_run
/// use git_permalink_core::{CliGitExecutor, RemoteInspector};
///
/// let git = CliGitExecutor::new();
/// let inspector = RemoteInspector::new(&git);
/// for remote in inspector.list_remotes() {
///     println!("{remote}");
/// }
/// ```
pub struct RemoteInspector<'a> {
    git: &'a dyn GitExecutor,
}

impl<'a> RemoteInspector<'a> {
    /// Creates an inspector running its queries through `git`.
    pub fn new(git: &'a dyn GitExecutor) -> Self {
        Self { git }
    }

    /// Names of all configured remotes, in the order Git reports them.
    ///
    /// The order is stable for a given configuration but not necessarily
    /// alphabetical. Returns an empty list when the query fails, e.g.
    /// outside a repository.
    pub fn list_remotes(&self) -> Vec<String> {
        let output = self.git.run(&["remote"]);
        if output.succeeded {
            output.lines
        } else {
            Vec::new()
        }
    }

    /// The fetch URI configured for `remote`, if Git knows one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRemoteName`] when `remote` is empty. That is
    /// a broken call site, not an I/O condition, and is reported before
    /// any Git invocation happens.
    pub fn remote_uri(&self, remote: &str) -> Result<Option<String>> {
        if remote.is_empty() {
            return Err(Error::EmptyRemoteName);
        }
        let output = self.git.run(&["remote", "get-url", remote]);
        Ok(output.first_line().map(str::to_string))
    }

    /// Short name of the branch the current branch tracks on `remote`.
    ///
    /// Resolves the symbolic `HEAD` ref, looks up its configured upstream,
    /// and strips the `<remote>/` prefix. Any miss along that chain (a
    /// detached `HEAD`, no upstream configured, or an upstream on a
    /// different remote) yields [`TRACKING_BRANCH_FALLBACK`] instead.
    pub fn tracking_branch(&self, remote: &str) -> String {
        match self.upstream_short_branch(remote) {
            Some(branch) => branch,
            None => TRACKING_BRANCH_FALLBACK.to_string(),
        }
    }

    /// Walks `HEAD` -> upstream -> short branch name, absent on any miss.
    fn upstream_short_branch(&self, remote: &str) -> Option<String> {
        let head = self.git.run(&["symbolic-ref", "-q", "HEAD"]);
        let head_ref = head.first_line()?;

        let upstream = self
            .git
            .run(&["for-each-ref", "--format=%(upstream:short)", head_ref]);
        let short = upstream.first_line()?;

        let branch = short.strip_prefix(&format!("{remote}/"))?;
        Some(branch.to_string())
    }

    /// Whether `file` exists in the tree of `rev`.
    ///
    /// `file` is a path relative to the repository root, as Git prints it.
    pub fn is_file_in_rev(&self, rev: &str, file: &str) -> bool {
        let spec = format!("{rev}:{file}");
        self.git.run(&["cat-file", "-e", &spec]).succeeded
    }

    /// Whether the working-tree content of `file` differs from `rev`.
    ///
    /// A permalink built against `rev` can be misleading when this returns
    /// `true`; callers typically warn rather than refuse.
    pub fn has_file_changed(&self, rev: &str, file: &str) -> bool {
        !self
            .git
            .run(&["diff", "--exit-code", rev, "--", file])
            .succeeded
    }
}
