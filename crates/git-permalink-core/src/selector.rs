//! Remote selection for repositories with more than one remote.
//!
//! When a repository has a single remote there is nothing to decide. With
//! several, [`RemoteSelector`] refuses to guess: it follows the current
//! branch's upstream to a remote, or tells the user how to configure one.

use crate::executor::GitExecutor;
use crate::inspector::RemoteInspector;
use crate::models::{Notification, NotificationSink};
use crate::resolver::rev_name;
use crate::uri::word_run;

/// Picks the remote a permalink should be built against.
///
/// # Example
///
/// ```no_run
/// use git_permalink_core::{CliGitExecutor, Notification, RemoteSelector};
///
/// let git = CliGitExecutor::new();
/// let selector = RemoteSelector::new(&git);
///
/// let mut notifications: Vec<Notification> = Vec::new();
/// if let Some(remote) = selector.select_remote(&mut notifications) {
///     println!("linking against {remote}");
/// }
/// ```
pub struct RemoteSelector<'a> {
    git: &'a dyn GitExecutor,
}

impl<'a> RemoteSelector<'a> {
    /// Creates a selector running its queries through `git`.
    pub fn new(git: &'a dyn GitExecutor) -> Self {
        Self { git }
    }

    /// The remote to use, or absent when none can be chosen safely.
    ///
    /// - No remotes configured: an error notification is delivered and the
    ///   result is absent.
    /// - Exactly one remote: returned as-is, with no further Git queries.
    /// - Several remotes: the current branch's upstream decides. Without
    ///   an upstream the user gets a warning with the command to set one,
    ///   and the result is absent rather than an arbitrary pick.
    ///
    /// # Panics
    ///
    /// Panics when Git's own metadata is self-contradictory: the upstream
    /// branch's short name has no `<remote>/` prefix, or names a remote
    /// that is not in the remote list. Both indicate a broken repository
    /// invariant rather than bad input, so no recovery is attempted.
    pub fn select_remote(&self, sink: &mut dyn NotificationSink) -> Option<String> {
        let remotes = RemoteInspector::new(self.git).list_remotes();

        match remotes.len() {
            0 => {
                sink.notify(Notification::error(
                    "no remotes are configured for this repository",
                ));
                None
            }
            1 => remotes.into_iter().next(),
            _ => self.pick_by_upstream(&remotes, sink),
        }
    }

    /// Resolves the ambiguity among several remotes via `@{u}`.
    fn pick_by_upstream(
        &self,
        remotes: &[String],
        sink: &mut dyn NotificationSink,
    ) -> Option<String> {
        let short = match rev_name(self.git, "@{u}") {
            Some(short) => short,
            None => {
                sink.notify(Notification::warning(
                    "multiple remotes are configured but the current branch tracks none of them; \
                     set one with 'git branch --set-upstream-to=<remote>/<branch>'",
                ));
                return None;
            }
        };

        let prefix_len = word_run(&short);
        let prefix = &short[..prefix_len];
        if prefix.is_empty() || short.as_bytes().get(prefix_len) != Some(&b'/') {
            panic!("upstream branch '{short}' has no remote prefix");
        }
        if !remotes.iter().any(|remote| remote.as_str() == prefix) {
            panic!("upstream branch '{short}' references unknown remote '{prefix}'");
        }

        Some(prefix.to_string())
    }
}
