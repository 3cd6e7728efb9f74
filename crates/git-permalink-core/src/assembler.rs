//! Assembly of the final permalink record.
//!
//! [`RepoDataAssembler`] composes the other components into the two
//! operations hosts actually call. Assembly is all-or-nothing: the caller
//! either receives a fully populated [`RepoData`] or nothing, with every
//! diagnostic already delivered to the sink.

use crate::error::Result;
use crate::executor::GitExecutor;
use crate::inspector::RemoteInspector;
use crate::models::{Notification, NotificationSink, RepoData, ResolveConfig};
use crate::resolver::RevisionResolver;
use crate::selector::RemoteSelector;
use crate::uri::parse_remote_uri;

/// Builds [`RepoData`] records for a repository.
///
/// # Example
///
/// ```no_run
/// use git_permalink_core::{CliGitExecutor, Notification, RepoDataAssembler};
///
/// let git = CliGitExecutor::in_dir("/path/to/repo");
/// let assembler = RepoDataAssembler::new(&git);
///
/// let mut notifications: Vec<Notification> = Vec::new();
/// if let Some(data) = assembler.permalink_data(None, &mut notifications)? {
///     println!("{}/{} at {}", data.host, data.repo_path, data.rev);
/// }
/// for n in &notifications {
///     eprintln!("{n}");
/// }
/// # Ok::<(), git_permalink_core::Error>(())
/// ```
pub struct RepoDataAssembler<'a> {
    git: &'a dyn GitExecutor,
    config: ResolveConfig,
}

impl<'a> RepoDataAssembler<'a> {
    /// Creates an assembler with the default resolution configuration.
    pub fn new(git: &'a dyn GitExecutor) -> Self {
        Self::with_config(git, ResolveConfig::default())
    }

    /// Creates an assembler with an explicit resolution configuration.
    pub fn with_config(git: &'a dyn GitExecutor, config: ResolveConfig) -> Self {
        Self { git, config }
    }

    /// Connection data for `remote`, with the tracking branch as revision.
    ///
    /// Fetches the remote's URI, parses it, and attaches the current
    /// branch's tracking branch as the revision. The revision is a branch
    /// name, not a commit id, and may be the
    /// [fallback guess](crate::TRACKING_BRANCH_FALLBACK); callers that
    /// need a revision guaranteed to exist on the remote want
    /// [`permalink_data`](Self::permalink_data) instead.
    ///
    /// Returns `None` when the URI cannot be fetched or parsed; the cause
    /// has already been delivered to `sink` by then.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRemoteName`](crate::Error::EmptyRemoteName)
    /// when `remote` is empty.
    pub fn repo_data(
        &self,
        remote: &str,
        sink: &mut dyn NotificationSink,
    ) -> Result<Option<RepoData>> {
        let inspector = RemoteInspector::new(self.git);

        let uri = match inspector.remote_uri(remote)? {
            Some(uri) => uri,
            None => {
                sink.notify(Notification::error(format!(
                    "cannot read the uri of remote '{remote}'"
                )));
                return Ok(None);
            }
        };

        let parsed = match parse_remote_uri(&uri) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Parse failures are the user's configuration, not a bug.
                sink.notify(Notification::error(e.to_string()));
                return Ok(None);
            }
        };

        let rev = inspector.tracking_branch(remote);
        Ok(Some(RepoData::from_parts(parsed, rev)))
    }

    /// Everything a renderer needs for a permalink.
    ///
    /// With `remote` absent the remote is chosen by [`RemoteSelector`];
    /// the revision always comes from
    /// [`RevisionResolver`](crate::RevisionResolver), so a `Some` result
    /// carries a revision known to exist on the remote (or, as a last
    /// resort, the remote's own `HEAD`).
    ///
    /// Returns `None` as soon as any stage declines, with that stage's
    /// notifications already delivered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRemoteName`](crate::Error::EmptyRemoteName)
    /// when `remote` is `Some("")`.
    pub fn permalink_data(
        &self,
        remote: Option<&str>,
        sink: &mut dyn NotificationSink,
    ) -> Result<Option<RepoData>> {
        let remote = match remote {
            Some(remote) => remote.to_string(),
            None => match RemoteSelector::new(self.git).select_remote(sink) {
                Some(remote) => remote,
                None => return Ok(None),
            },
        };

        let data = match self.repo_data(&remote, sink)? {
            Some(data) => data,
            None => return Ok(None),
        };

        let resolver = RevisionResolver::with_config(self.git, self.config.clone());
        let rev = match resolver.closest_remote_compatible_rev(&remote, sink) {
            Some(rev) => rev,
            None => return Ok(None),
        };

        Ok(Some(RepoData { rev, ..data }))
    }
}
