//! Command-line interface for the Git permalink resolver.
//!
//! This binary resolves the components of a permanent web link (host,
//! optional port, repository path, revision) for a file in a local Git
//! repository and prints them as labeled text or JSON.

use anyhow::{Context, Result};
use clap::Parser;
use git_permalink_core::{
    l10n::Localizer, CliGitExecutor, Notification, RemoteInspector, RemoteSelector, RepoData,
    RepoDataAssembler, ResolveConfig, DEFAULT_MAX_ANCESTOR_DEPTH,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Git Permalink Resolver - permalink components for files in Git repositories
#[derive(Parser, Debug)]
#[command(
    name = "permalink-cli",
    version,
    about = "Resolve permalink components for a file in a Git repository",
    long_about = None
)]
struct Cli {
    /// Repository to inspect instead of the current directory
    #[arg(
        short = 'C',
        long = "repo",
        value_name = "PATH",
        help = "Repository to inspect (default: current directory)"
    )]
    repo: Option<PathBuf>,

    /// Remote to link against
    #[arg(
        short = 'r',
        long = "remote",
        value_name = "NAME",
        help = "Remote to link against (default: chosen from the upstream branch)"
    )]
    remote: Option<String>,

    /// File the permalink should point at
    #[arg(
        short = 'f',
        long = "file",
        value_name = "PATH",
        help = "File to link to, relative to the repository root"
    )]
    file: Option<String>,

    /// Line number within the linked file
    #[arg(
        short = 'n',
        long = "line",
        value_name = "N",
        requires = "file",
        help = "Line number within the linked file"
    )]
    line: Option<u32>,

    /// Use the tracking branch instead of a pinned revision
    #[arg(
        short = 'b',
        long = "branch",
        help = "Link to the tracking branch instead of a pinned revision"
    )]
    branch: bool,

    /// How many ancestors of HEAD to test for remote visibility
    #[arg(
        short = 'd',
        long = "depth",
        value_name = "N",
        help = "Ancestors of HEAD to test for remote visibility (default: 50)"
    )]
    depth: Option<usize>,

    /// Output as JSON instead of labeled text
    #[arg(short = 'j', long = "json", help = "Output as JSON")]
    json: bool,

    /// Show debug output for every Git invocation
    #[arg(short = 'v', long = "verbose", help = "Show verbose output")]
    verbose: bool,

    /// Locale for messages (e.g., en, de)
    #[arg(
        short = 'l',
        long = "locale",
        value_name = "LOCALE",
        help = "Locale for messages (e.g., en, de)"
    )]
    locale: Option<String>,
}

/// Everything one invocation produced, in one serializable record.
#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<RepoData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<u32>,
    notifications: Vec<Notification>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    // Initialize localizer
    let localizer = if let Some(locale) = &cli.locale {
        Localizer::new(locale).with_context(|| format!("failed to load locale: {locale}"))?
    } else {
        Localizer::from_system()
            .unwrap_or_else(|_| Localizer::new("en").expect("failed to load default locale"))
    };

    let git = build_executor(&cli)?;
    let assembler = RepoDataAssembler::with_config(&git, build_config(cli.depth));

    if !cli.json && cli.verbose {
        eprintln!(
            "{}",
            clean_fluent_string(&localizer.get("resolve-started", None))
        );
        if cli.branch {
            eprintln!(
                "{}",
                clean_fluent_string(&localizer.get("resolve-branch-mode", None))
            );
        }
    }

    let mut notifications: Vec<Notification> = Vec::new();
    let data = resolve(&cli, &git, &assembler, &mut notifications)
        .context("could not assemble permalink data")?;

    // Working-tree checks only make sense once a revision is known
    if let (Some(file), Some(data)) = (&cli.file, &data) {
        check_file(&git, file, &data.rev, &localizer, &mut notifications);
    }

    let found = data.is_some();
    let report = Report {
        data,
        file: cli.file.clone(),
        line: cli.line,
        notifications,
    };

    if cli.json {
        output_json(&report)?;
    } else {
        output_text(&report, &localizer);
    }

    if !found {
        anyhow::bail!("{}", clean_fluent_string(&localizer.get("no-data", None)));
    }
    Ok(())
}

/// Runs the assembly path selected by the CLI flags.
fn resolve(
    cli: &Cli,
    git: &CliGitExecutor,
    assembler: &RepoDataAssembler<'_>,
    notifications: &mut Vec<Notification>,
) -> git_permalink_core::Result<Option<RepoData>> {
    if cli.branch {
        let remote = match cli.remote.clone() {
            Some(remote) => Some(remote),
            None => RemoteSelector::new(git).select_remote(notifications),
        };
        match remote {
            Some(remote) => assembler.repo_data(&remote, notifications),
            None => Ok(None),
        }
    } else {
        assembler.permalink_data(cli.remote.as_deref(), notifications)
    }
}

/// Warns when the linked file is missing or stale at the resolved revision.
fn check_file(
    git: &CliGitExecutor,
    file: &str,
    rev: &str,
    localizer: &Localizer,
    notifications: &mut Vec<Notification>,
) {
    let inspector = RemoteInspector::new(git);
    if !inspector.is_file_in_rev(rev, file) {
        let message = localizer.get("file-missing-at-rev", Some(&[("file", file), ("rev", rev)]));
        notifications.push(Notification::warning(clean_fluent_string(&message)));
    } else if inspector.has_file_changed(rev, file) {
        let message = localizer.get("file-changed-at-rev", Some(&[("file", file), ("rev", rev)]));
        notifications.push(Notification::warning(clean_fluent_string(&message)));
    }
}

/// Builds the Git executor, validating any explicit repository path.
fn build_executor(cli: &Cli) -> Result<CliGitExecutor> {
    match &cli.repo {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("path does not exist: {}", path.display());
            }
            if !path.is_dir() {
                anyhow::bail!("path is not a directory: {}", path.display());
            }
            Ok(CliGitExecutor::in_dir(path))
        }
        None => Ok(CliGitExecutor::new()),
    }
}

/// Builds the resolution configuration from CLI arguments.
fn build_config(depth: Option<usize>) -> ResolveConfig {
    ResolveConfig {
        max_ancestor_depth: depth.unwrap_or(DEFAULT_MAX_ANCESTOR_DEPTH),
    }
}

/// Initializes stderr logging; --verbose lowers the filter to debug.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Outputs the report as JSON to stdout
fn output_json(report: &Report) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("failed to serialize report to JSON")?;
    println!("{json}");
    Ok(())
}

/// Outputs the report as labeled lines to stdout
fn output_text(report: &Report, localizer: &Localizer) {
    for notification in &report.notifications {
        eprintln!("{notification}");
    }

    if let Some(data) = &report.data {
        println!(
            "{}",
            clean_fluent_string(&localizer.get("report-header", None))
        );
        print_row(localizer, "host-label", &data.host);
        if let Some(port) = &data.port {
            print_row(localizer, "port-label", port);
        }
        print_row(localizer, "repo-label", &data.repo_path);
        print_row(localizer, "rev-label", &data.rev);
        if let Some(file) = &report.file {
            print_row(localizer, "file-label", file);
        }
        if let Some(line) = report.line {
            print_row(localizer, "line-label", &line.to_string());
        }
    }
}

/// Prints one aligned label/value row.
fn print_row(localizer: &Localizer, label_id: &str, value: &str) {
    let label = clean_fluent_string(&localizer.get(label_id, None));
    println!("  {label:<12} {value}");
}

/// Removes Unicode control characters that Fluent might add
fn clean_fluent_string(s: &str) -> String {
    s.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{2068}' |  // FIRST STRONG ISOLATE
            '\u{2069}' |  // POP DIRECTIONAL ISOLATE
            '\u{202A}' |  // LEFT-TO-RIGHT EMBEDDING
            '\u{202B}' |  // RIGHT-TO-LEFT EMBEDDING
            '\u{202C}' |  // POP DIRECTIONAL FORMATTING
            '\u{202D}' |  // LEFT-TO-RIGHT OVERRIDE
            '\u{202E}' // RIGHT-TO-LEFT OVERRIDE
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_clean_fluent_string() {
        assert_eq!(clean_fluent_string("test\u{2068}123\u{2069}"), "test123");
        assert_eq!(clean_fluent_string("hello"), "hello");
        assert_eq!(clean_fluent_string("\u{2068}wrapped\u{2069}"), "wrapped");
    }

    #[test]
    fn test_build_config_depth() {
        assert_eq!(build_config(None).max_ancestor_depth, 50);
        assert_eq!(build_config(Some(7)).max_ancestor_depth, 7);
    }

    #[test]
    fn test_report_skips_absent_fields() {
        let report = Report {
            data: None,
            file: None,
            line: None,
            notifications: Vec::new(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("file"));
        assert!(!json.contains("line"));
        assert!(json.contains("notifications"));
    }

    #[test]
    fn test_report_includes_data_when_present() {
        let report = Report {
            data: Some(RepoData {
                host: "example.com".to_string(),
                port: None,
                repo_path: "group/project".to_string(),
                rev: "abc123".to_string(),
            }),
            file: Some("src/lib.rs".to_string()),
            line: Some(42),
            notifications: Vec::new(),
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"host\":\"example.com\""));
        assert!(json.contains("\"line\":42"));
    }
}
