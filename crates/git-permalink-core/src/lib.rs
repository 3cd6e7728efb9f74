//! # git-permalink-core
//!
//! A library for resolving the components of a permanent web link (a
//! "permalink") to a file in a local Git working tree.
//!
//! ## Features
//!
//! - **Remote URI parsing** for scheme URIs and SSH shorthand
//! - **Revision resolution** that prefers revisions known to exist on the remote
//! - **Remote selection** driven by the current branch's upstream
//! - **Localization support** via Fluent (currently English and German)
//! - **JSON serialization** for all data structures
//!
//! ## Quick Start
//!
//! ```no_run
//! use git_permalink_core::{CliGitExecutor, Notification, RepoDataAssembler};
//!
//! let git = CliGitExecutor::in_dir("/home/user/projects/demo");
//! let assembler = RepoDataAssembler::new(&git);
//!
//! let mut notifications: Vec<Notification> = Vec::new();
//! match assembler.permalink_data(None, &mut notifications) {
//!     Ok(Some(data)) => println!("{}/{} at {}", data.host, data.repo_path, data.rev),
//!     Ok(None) => {
//!         for n in &notifications {
//!             eprintln!("{n}");
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```
//!
//! The library never renders URLs itself: the host, optional port,
//! repository path, and revision are handed to the embedding layer, which
//! knows its forge's URL scheme.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`] - Core data structures (ParsedRepo, RepoData, Notification)
//! - [`uri`] - Remote URI parsing
//! - [`executor`] - Subprocess boundary around the `git` binary
//! - [`inspector`] - Remote and working-tree queries
//! - [`resolver`] - Remote-compatible revision resolution
//! - [`selector`] - Remote selection among several candidates
//! - [`assembler`] - Assembly of the final permalink record
//! - [`error`] - Custom error types
//! - [`l10n`] - Localization utilities
//!
//! ## CLI Binary
//!
//! This crate also provides a `permalink-cli` binary for command-line
//! usage. See the binary's `--help` output for details.

// Module declarations
pub mod assembler;
pub mod error;
pub mod executor;
pub mod inspector;
pub mod l10n;
pub mod models;
pub mod resolver;
pub mod selector;
pub mod uri;

// Re-export commonly used types for convenience
pub use assembler::RepoDataAssembler;
pub use error::{Error, Result};
pub use executor::{CliGitExecutor, GitExecutor, GitOutput};
pub use inspector::{RemoteInspector, TRACKING_BRANCH_FALLBACK};
pub use models::{
    Notification, NotificationSink, ParsedRepo, RepoData, ResolveConfig, Severity,
    DEFAULT_MAX_ANCESTOR_DEPTH,
};
pub use resolver::RevisionResolver;
pub use selector::RemoteSelector;
pub use uri::parse_remote_uri;

/// Library version, derived from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
