//! Error types for git-permalink-core.
//!
//! This module defines a custom error type using `thiserror` for the library's
//! public API, while using `anyhow` internally for error propagation in the CLI.

use thiserror::Error;

/// A specialized Result type for git-permalink-core operations.
///
/// This is a convenience alias that uses our custom [`Error`] type.
///
/// # Example
///
/// ```
/// use git_permalink_core::Result;
///
/// fn resolve_something() -> Result<String> {
///     Ok("success".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing remote URIs and resolving revisions.
///
/// Soft failures (a remote that cannot be resolved, a revision with no
/// remote-visible ancestor) are *not* errors: they surface as `None` results
/// plus user-facing notifications. This enum covers the cases where the
/// input or the call site itself is wrong.
#[derive(Error, Debug)]
pub enum Error {
    /// A remote URI did not match any supported transport form.
    ///
    /// Carries the ordered list of diagnostics accumulated by the parser.
    /// Several stages can fail on the same input, so `messages` may hold
    /// more than one entry; a parse that produced any entry is failed even
    /// if partial structure was recognized.
    #[error("cannot parse remote uri '{uri}': {}", .messages.join("; "))]
    UriParse {
        /// The original, unmodified URI that failed to parse.
        uri: String,
        /// Human-readable diagnostics in the order the stages failed.
        messages: Vec<String>,
    },

    /// A remote-scoped operation was called with an empty remote name.
    ///
    /// This is a precondition violation, a bug at the call site rather than
    /// a data error. It is kept distinct so callers fix the call site instead
    /// of adding data-handling logic.
    #[error("remote name must not be empty")]
    EmptyRemoteName,

    /// Localization system error.
    ///
    /// This covers errors in loading or using Fluent translation files.
    #[error("Localization error: {0}")]
    L10n(String),
}

// Helper constructors for common error cases
impl Error {
    /// Creates a UriParse error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// return Err(Error::uri_parse(uri, errors));
    /// ```
    pub fn uri_parse(uri: impl Into<String>, messages: Vec<String>) -> Self {
        Error::UriParse {
            uri: uri.into(),
            messages,
        }
    }

    /// Creates an L10n error.
    pub fn l10n(message: impl Into<String>) -> Self {
        Error::L10n(message.into())
    }
}
