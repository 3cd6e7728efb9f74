//! Revision resolution against a remote.
//!
//! Local history frequently holds commits the remote has never seen, so a
//! permalink built from `HEAD` can point at nothing. [`RevisionResolver`]
//! finds the closest revision that actually exists on a given remote,
//! trying the guaranteed-correct source first and falling back to
//! cheaper guesses only when it must.

use crate::executor::GitExecutor;
use crate::models::{Notification, NotificationSink, ResolveConfig};

/// Resolves a revspec to a commit id, absent when Git cannot.
pub(crate) fn rev_parse(git: &dyn GitExecutor, revspec: &str) -> Option<String> {
    git.run(&["rev-parse", revspec])
        .first_line()
        .map(str::to_string)
}

/// Resolves a revspec to its short symbolic name, absent when Git cannot.
pub(crate) fn rev_name(git: &dyn GitExecutor, revspec: &str) -> Option<String> {
    git.run(&["rev-parse", "--abbrev-ref", revspec])
        .first_line()
        .map(str::to_string)
}

/// Finds revisions that are visible on a remote.
///
/// # Example
///
/// ```no_run
/// use git_permalink_core::{CliGitExecutor, Notification, RevisionResolver};
///
/// let git = CliGitExecutor::new();
/// let resolver = RevisionResolver::new(&git);
///
/// let mut notifications: Vec<Notification> = Vec::new();
/// match resolver.closest_remote_compatible_rev("origin", &mut notifications) {
///     Some(rev) => println!("link against {rev}"),
///     None => eprintln!("{}", notifications[0]),
/// }
/// ```
pub struct RevisionResolver<'a> {
    git: &'a dyn GitExecutor,
    config: ResolveConfig,
}

impl<'a> RevisionResolver<'a> {
    /// Creates a resolver with the default configuration.
    pub fn new(git: &'a dyn GitExecutor) -> Self {
        Self::with_config(git, ResolveConfig::default())
    }

    /// Creates a resolver with an explicit configuration.
    pub fn with_config(git: &'a dyn GitExecutor, config: ResolveConfig) -> Self {
        Self { git, config }
    }

    /// The nearest revision to `HEAD` known to exist on `remote`.
    ///
    /// Tries, in order, returning at the first success:
    ///
    /// 1. The upstream ref `@{u}`. An upstream lives on a remote by
    ///    definition, so its resolution is returned without any further
    ///    checking.
    /// 2. `HEAD` itself, if some remote-tracking branch of `remote`
    ///    contains it.
    /// 3. The ancestors `HEAD~1` up to `HEAD~n` (`n` is
    ///    [`max_ancestor_depth`](ResolveConfig::max_ancestor_depth)), in
    ///    increasing distance, with the same containment test.
    /// 4. `remote` itself as a revspec, i.e. wherever the remote's `HEAD`
    ///    currently points. This one carries no reachability guarantee.
    ///
    /// When every step fails, one error notification naming the remote is
    /// delivered to `sink` and the result is absent. That outcome is
    /// terminal for the request; retrying cannot succeed without the user
    /// first pushing or fetching.
    pub fn closest_remote_compatible_rev(
        &self,
        remote: &str,
        sink: &mut dyn NotificationSink,
    ) -> Option<String> {
        if let Some(rev) = rev_parse(self.git, "@{u}") {
            return Some(rev);
        }

        if self.is_rev_on_remote(remote, "HEAD") {
            if let Some(rev) = rev_parse(self.git, "HEAD") {
                return Some(rev);
            }
        }

        for distance in 1..=self.config.max_ancestor_depth {
            let revspec = format!("HEAD~{distance}");
            if self.is_rev_on_remote(remote, &revspec) {
                if let Some(rev) = rev_parse(self.git, &revspec) {
                    return Some(rev);
                }
            }
        }

        if let Some(rev) = rev_parse(self.git, remote) {
            return Some(rev);
        }

        sink.notify(Notification::error(format!(
            "cannot find a revision available on remote '{remote}'"
        )));
        None
    }

    /// Whether a remote-tracking branch of `remote` contains `revspec`.
    ///
    /// A nonexistent revspec (e.g. `HEAD~40` in a short history) fails
    /// the underlying command and counts as not contained.
    fn is_rev_on_remote(&self, remote: &str, revspec: &str) -> bool {
        let output = self.git.run(&["branch", "--remotes", "--contains", revspec]);
        if !output.succeeded {
            return false;
        }
        let prefix = format!("{remote}/");
        output
            .lines
            .iter()
            .any(|line| line.trim().starts_with(&prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::fake::FakeGit;

    fn small_depth() -> ResolveConfig {
        ResolveConfig {
            max_ancestor_depth: 3,
        }
    }

    #[test]
    fn test_upstream_wins_without_containment_check() {
        let git = FakeGit::new().ok(&["rev-parse", "@{u}"], &["abc123"]);
        let resolver = RevisionResolver::new(&git);
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev.as_deref(), Some("abc123"));
        assert!(sink.is_empty());
        // One invocation total: no branch listing happened.
        assert_eq!(git.invocations(), vec![vec!["rev-parse", "@{u}"]]);
    }

    #[test]
    fn test_head_when_contained_in_remote_branch() {
        let git = FakeGit::new()
            .ok(&["branch", "--remotes", "--contains", "HEAD"], &["  origin/main"])
            .ok(&["rev-parse", "HEAD"], &["deadbeef"]);
        let resolver = RevisionResolver::with_config(&git, small_depth());
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev.as_deref(), Some("deadbeef"));
        let calls = git.invocations();
        assert_eq!(calls[0], vec!["rev-parse", "@{u}"]);
        assert_eq!(calls[1], vec!["branch", "--remotes", "--contains", "HEAD"]);
        assert_eq!(calls[2], vec!["rev-parse", "HEAD"]);
    }

    #[test]
    fn test_walks_ancestors_in_distance_order() {
        let git = FakeGit::new()
            .ok(
                &["branch", "--remotes", "--contains", "HEAD~2"],
                &["  origin/main", "  origin/topic"],
            )
            .ok(&["rev-parse", "HEAD~2"], &["cafe42"]);
        let resolver = RevisionResolver::with_config(&git, small_depth());
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev.as_deref(), Some("cafe42"));
        assert!(sink.is_empty());
        let calls = git.invocations();
        // @{u}, HEAD check, HEAD~1 check, HEAD~2 check, HEAD~2 resolve.
        assert_eq!(calls.len(), 5);
        assert_eq!(calls[3], vec!["branch", "--remotes", "--contains", "HEAD~2"]);
    }

    #[test]
    fn test_containment_requires_branch_of_requested_remote() {
        // HEAD is only on a different remote's branch, so the chain keeps
        // going and finally exhausts.
        let git = FakeGit::new().ok(
            &["branch", "--remotes", "--contains", "HEAD"],
            &["  fork/main"],
        );
        let resolver = RevisionResolver::with_config(&git, small_depth());
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev, None);
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_remote_head_as_last_resort() {
        let git = FakeGit::new().ok(&["rev-parse", "origin"], &["1234abcd"]);
        let resolver = RevisionResolver::with_config(&git, small_depth());
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev.as_deref(), Some("1234abcd"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_exhaustion_emits_exactly_one_error() {
        let git = FakeGit::new();
        let resolver = RevisionResolver::with_config(&git, small_depth());
        let mut sink: Vec<Notification> = Vec::new();

        let rev = resolver.closest_remote_compatible_rev("origin", &mut sink);

        assert_eq!(rev, None);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].severity, crate::models::Severity::Error);
        assert!(sink[0].message.contains("origin"));
        // @{u}, HEAD, three ancestors, the remote itself.
        assert_eq!(git.invocation_count(), 6);
    }

    #[test]
    fn test_default_depth_walks_fifty_ancestors() {
        let git = FakeGit::new();
        let resolver = RevisionResolver::new(&git);
        let mut sink: Vec<Notification> = Vec::new();

        assert_eq!(resolver.closest_remote_compatible_rev("origin", &mut sink), None);
        assert_eq!(git.invocation_count(), 53);
    }

    #[test]
    fn test_rev_name_resolves_short_names() {
        let git = FakeGit::new().ok(&["rev-parse", "--abbrev-ref", "@{u}"], &["origin/main"]);

        assert_eq!(rev_name(&git, "@{u}").as_deref(), Some("origin/main"));
        assert_eq!(rev_name(&git, "HEAD"), None);
    }
}
