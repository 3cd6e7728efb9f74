//! Core data models for permalink resolution.
//!
//! All types in this module are designed to be JSON-serializable so that
//! embedding layers (editors, CLIs) can pass them across process boundaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured connection data extracted from a Git remote URI.
///
/// This is the output of [`parse_remote_uri`](crate::parse_remote_uri). A
/// value of this type always satisfies the parser invariant: `host` and
/// `repo_path` are non-empty. A URI that would violate that invariant is a
/// parse *failure*, never a zero-valued `ParsedRepo`.
///
/// # Example
///
/// ```
/// # use git_permalink_core::ParsedRepo;
/// let repo = ParsedRepo {
///     host: "github.com".to_string(),
///     port: None,
///     repo_path: "rust-lang/rust".to_string(),
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ParsedRepo {
    /// The hostname of the remote (e.g., "github.com").
    ///
    /// Case-sensitive, exactly as written in the URI.
    pub host: String,

    /// Explicit port, kept only for `http://`/`https://` URIs.
    ///
    /// A numeric segment in an SSH-style URI (`git@host:2222/path`) is an
    /// SSH port and is discarded during parsing, because the permalink a
    /// renderer builds from this data is always HTTP(S).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// The repository path after `host[:port]` (e.g., "group/sub/project").
    ///
    /// May contain further `/` separators for nested groups, and may start
    /// with `~` for home-relative Git daemon paths. The `.git` suffix is
    /// already stripped.
    pub repo_path: String,
}

/// The final assembled record a rendering layer turns into a permalink.
///
/// `RepoData` is a [`ParsedRepo`] plus the revision to link to. It is
/// created once per request by
/// [`RepoDataAssembler`](crate::RepoDataAssembler), never mutated after
/// assembly, and owned exclusively by the caller once returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoData {
    /// The hostname of the remote.
    pub host: String,

    /// Explicit port, HTTP(S) URIs only. See [`ParsedRepo::port`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,

    /// The repository path after `host[:port]`.
    pub repo_path: String,

    /// The revision the permalink should point at.
    ///
    /// Either a revision confirmed to exist on the remote (the common
    /// case), or a tracking-branch-derived name that the caller must treat
    /// as a best guess.
    pub rev: String,
}

impl RepoData {
    /// Combines parsed connection data with a resolved revision.
    pub fn from_parts(repo: ParsedRepo, rev: impl Into<String>) -> Self {
        Self {
            host: repo.host,
            port: repo.port,
            repo_path: repo.repo_path,
            rev: rev.into(),
        }
    }
}

/// Severity of a user-facing diagnostic.
///
/// The core emits exactly two severities; how they are displayed is the
/// host environment's concern.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The request cannot proceed (e.g., no remotes, resolution exhausted).
    Error,
    /// The request stopped for a reason the user can fix (e.g., ambiguous
    /// remotes without an upstream branch).
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A user-facing diagnostic produced during resolution.
///
/// Components never print or log these themselves; they hand them to the
/// caller-supplied [`NotificationSink`], which decides presentation. This
/// keeps the algorithmic core testable without a host environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// How serious the diagnostic is.
    pub severity: Severity,
    /// Ready-to-display message text (plain English, not localized).
    pub message: String,
}

impl Notification {
    /// Creates an error-severity notification.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    /// Creates a warning-severity notification.
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Receives the diagnostics a resolution request produces.
///
/// Hosts supply an implementation when calling into the resolver, selector,
/// or assembler; the core only decides *what* to say and *when*. The trait
/// is implemented for `Vec<Notification>` so tests and simple hosts can
/// collect:
///
/// # Example
///
/// ```
/// use git_permalink_core::{Notification, NotificationSink};
///
/// let mut sink: Vec<Notification> = Vec::new();
/// sink.notify(Notification::warning("something odd"));
/// assert_eq!(sink.len(), 1);
/// ```
pub trait NotificationSink {
    /// Delivers one diagnostic to the host.
    fn notify(&mut self, notification: Notification);
}

impl NotificationSink for Vec<Notification> {
    fn notify(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Default bound for the ancestor walk in revision resolution.
///
/// Chosen as a cost/completeness tradeoff: deep enough to step over a
/// typical run of unpushed commits, bounded so a request never scans
/// unbounded history.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 50;

/// Configuration for revision-resolution requests.
///
/// # Example
///
/// ```
/// # use git_permalink_core::ResolveConfig;
/// let config = ResolveConfig {
///     max_ancestor_depth: 20,
/// };
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// How many ancestors of `HEAD` (`HEAD~1 ..= HEAD~n`) to test for
    /// remote visibility before giving up on history-walking.
    ///
    /// Correctness for deep local histories depends entirely on this bound;
    /// raise it when a workflow accumulates long runs of unpushed commits.
    pub max_ancestor_depth: usize,
}

impl Default for ResolveConfig {
    /// Creates a default resolution configuration.
    ///
    /// Uses [`DEFAULT_MAX_ANCESTOR_DEPTH`] (50 ancestors).
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_repo_serialization() {
        let repo = ParsedRepo {
            host: "gitlab.com".to_string(),
            port: Some("8443".to_string()),
            repo_path: "group/project".to_string(),
        };

        let json = serde_json::to_string(&repo).unwrap();
        assert!(json.contains("8443"));

        let deserialized: ParsedRepo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, repo);
    }

    #[test]
    fn test_parsed_repo_port_skipped_when_absent() {
        let repo = ParsedRepo {
            host: "example.com".to_string(),
            port: None,
            repo_path: "user/repo".to_string(),
        };

        let json = serde_json::to_string(&repo).unwrap();
        assert!(!json.contains("port"));
    }

    #[test]
    fn test_repo_data_from_parts() {
        let repo = ParsedRepo {
            host: "example.com".to_string(),
            port: Some("8080".to_string()),
            repo_path: "user/repo".to_string(),
        };

        let data = RepoData::from_parts(repo, "abc123");
        assert_eq!(data.host, "example.com");
        assert_eq!(data.port.as_deref(), Some("8080"));
        assert_eq!(data.repo_path, "user/repo");
        assert_eq!(data.rev, "abc123");
    }

    #[test]
    fn test_severity_serialization() {
        let json = serde_json::to_string(&Severity::Error).unwrap();
        assert_eq!(json, "\"error\"");

        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }

    #[test]
    fn test_notification_display() {
        let n = Notification::error("remote 'origin' not usable");
        assert_eq!(n.to_string(), "error: remote 'origin' not usable");

        let n = Notification::warning("multiple remotes");
        assert_eq!(n.to_string(), "warning: multiple remotes");
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut sink: Vec<Notification> = Vec::new();
        sink.notify(Notification::error("first"));
        sink.notify(Notification::warning("second"));

        assert_eq!(sink.len(), 2);
        assert_eq!(sink[0].severity, Severity::Error);
        assert_eq!(sink[1].message, "second");
    }

    #[test]
    fn test_resolve_config_default() {
        let config = ResolveConfig::default();
        assert_eq!(config.max_ancestor_depth, 50);
        assert_eq!(config.max_ancestor_depth, DEFAULT_MAX_ANCESTOR_DEPTH);
    }
}
