//! Remote URI parsing.
//!
//! This module turns the URI of a Git remote into structured connection
//! data. It understands both scheme-style URIs (`https://host/path`,
//! `ssh://git@host/path`) and SSH shorthand (`git@host:path`).
//!
//! Parsing is a fixed sequence of scanner stages over the input string:
//! transport-prefix strip, `.git` strip, host scan, optional port scan,
//! path scan. Each stage has its own failure message, and a failed stage
//! does not stop later independent stages from reporting too, so one bad
//! URI can yield several diagnostics.

use crate::error::{Error, Result};
use crate::models::ParsedRepo;

/// Parses the URI of a Git remote into its permalink-relevant parts.
///
/// The parser is pure and deterministic: the same input always produces
/// the same result, with no environment access.
///
/// Ports are kept only for `http://` and `https://` URIs. A numeric
/// segment in an SSH-style URI (`git@host:2222/path`) is an SSH port; it
/// is recognized so the path scan anchors past it, then dropped, because
/// it has no meaning for the HTTP(S) permalink built from this data.
///
/// # Arguments
///
/// * `uri` - The remote URI exactly as Git reports it
///
/// # Errors
///
/// Returns [`Error::UriParse`] carrying one message per failed stage:
///
/// - `"unsupported protocol format"` - no `scheme://` and no `user@` prefix
/// - `"cannot parse the hostname"` - no host followed by `:` or `/`
/// - `"cannot parse the repo path"` - nothing usable after `host[:port]`
///
/// # Examples
///
/// ```
/// use git_permalink_core::parse_remote_uri;
///
/// let repo = parse_remote_uri("git@gitlab.com:group/sub/project.git")?;
/// assert_eq!(repo.host, "gitlab.com");
/// assert_eq!(repo.repo_path, "group/sub/project");
/// assert!(repo.port.is_none());
/// # Ok::<(), git_permalink_core::Error>(())
/// ```
pub fn parse_remote_uri(uri: &str) -> Result<ParsedRepo> {
    let mut messages = Vec::new();

    // A scheme prefix and a user prefix can stack (https://user@host/...),
    // so both strips run; only "neither matched" is an error.
    let mut rest = uri;
    let mut prefix_stripped = false;
    if let Some(after) = strip_scheme(rest) {
        rest = after;
        prefix_stripped = true;
    }
    if let Some(after) = strip_user(rest) {
        rest = after;
        prefix_stripped = true;
    }
    if !prefix_stripped {
        messages.push("unsupported protocol format".to_string());
    }

    let rest = rest.strip_suffix(".git").unwrap_or(rest);

    // Host is a prerequisite for both the port and the path scan.
    let parsed = match scan_host(rest) {
        Some(host) => {
            let after_host = &rest[host.len()..];
            let port = scan_port(after_host);
            let path_start = port.map(|p| p.len() + 1).unwrap_or(0);
            match scan_path(&after_host[path_start..]) {
                Some(path) => Some((host, port, path)),
                None => {
                    messages.push("cannot parse the repo path".to_string());
                    None
                }
            }
        }
        None => {
            messages.push("cannot parse the hostname".to_string());
            None
        }
    };

    match parsed {
        Some((host, port, path)) if messages.is_empty() => {
            // Suppression is decided against the original input, not the
            // stripped remainder.
            let port = if uri.starts_with("http://") || uri.starts_with("https://") {
                port.map(str::to_string)
            } else {
                None
            };

            Ok(ParsedRepo {
                host: host.to_string(),
                port,
                repo_path: path.to_string(),
            })
        }
        _ => Err(Error::uri_parse(uri, messages)),
    }
}

/// Characters allowed in schemes, user names, and hostnames.
fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'-'
}

/// Characters allowed in repository paths.
///
/// Extends the word class with `/` for nested groups and `~` for
/// home-relative Git daemon paths.
fn is_path_byte(b: u8) -> bool {
    is_word_byte(b) || b == b'~' || b == b'/'
}

/// Length of the leading run of word characters.
///
/// The word class is pure ASCII, so the returned length is always a valid
/// slice boundary.
pub(crate) fn word_run(s: &str) -> usize {
    s.bytes().take_while(|&b| is_word_byte(b)).count()
}

/// Strips a `scheme://` prefix (e.g. `https://`, `ssh://`, `ftp://`).
fn strip_scheme(uri: &str) -> Option<&str> {
    let len = word_run(uri);
    if len == 0 {
        return None;
    }
    uri[len..].strip_prefix("://")
}

/// Strips a `user@` prefix (e.g. `git@`).
fn strip_user(uri: &str) -> Option<&str> {
    let len = word_run(uri);
    if len == 0 {
        return None;
    }
    uri[len..].strip_prefix('@')
}

/// Scans the hostname at the start of the prefix-stripped string.
///
/// The host is the longest leading run of word characters and must be
/// followed immediately by `:` or `/`, otherwise there is no place for a
/// repository path to start.
fn scan_host(rest: &str) -> Option<&str> {
    let len = word_run(rest);
    if len == 0 {
        return None;
    }
    match rest.as_bytes().get(len) {
        Some(b':') | Some(b'/') => Some(&rest[..len]),
        _ => None,
    }
}

/// Scans an optional `:<digits>` port directly after the host.
///
/// The digits only count as a port when another `:` or `/` follows them;
/// a trailing numeric segment (`host:8443` with nothing after) is a
/// repository path, not a port.
fn scan_port(after_host: &str) -> Option<&str> {
    let digits = after_host.strip_prefix(':')?;
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    match digits.as_bytes().get(len) {
        Some(b':') | Some(b'/') => Some(&digits[..len]),
        _ => None,
    }
}

/// Scans the repository path after `host[:port]`.
///
/// Expects one separator (`:` or `/`), then captures the remainder of the
/// string. The capture is greedy to end-of-string so nested group paths
/// keep all their `/` segments; a remainder with characters outside the
/// path class fails the scan.
fn scan_path(after_port: &str) -> Option<&str> {
    let mut chars = after_port.chars();
    match chars.next() {
        Some(':') | Some('/') => {}
        _ => return None,
    }
    let path = chars.as_str();
    if !path.is_empty() && path.bytes().all(is_path_byte) {
        Some(path)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_with_port() {
        let repo = parse_remote_uri("https://gitlab.example.com:8443/group/sub/project.git")
            .expect("should parse");
        assert_eq!(repo.host, "gitlab.example.com");
        assert_eq!(repo.port.as_deref(), Some("8443"));
        assert_eq!(repo.repo_path, "group/sub/project");
    }

    #[test]
    fn test_parse_https_without_port() {
        let repo = parse_remote_uri("https://github.com/rust-lang/rust").expect("should parse");
        assert_eq!(repo.host, "github.com");
        assert_eq!(repo.port, None);
        assert_eq!(repo.repo_path, "rust-lang/rust");
    }

    #[test]
    fn test_parse_ssh_shorthand() {
        let repo = parse_remote_uri("git@github.com:rust-lang/rust.git").expect("should parse");
        assert_eq!(repo.host, "github.com");
        assert_eq!(repo.port, None);
        assert_eq!(repo.repo_path, "rust-lang/rust");
    }

    #[test]
    fn test_parse_ssh_with_scheme() {
        let repo = parse_remote_uri("ssh://git@example.com/user/repo.git").expect("should parse");
        assert_eq!(repo.host, "example.com");
        assert_eq!(repo.repo_path, "user/repo");
    }

    #[test]
    fn test_ssh_port_is_discarded() {
        // 2222 anchors the path scan but must never reach the result.
        let repo = parse_remote_uri("git@example.com:2222/group/repo.git").expect("should parse");
        assert_eq!(repo.host, "example.com");
        assert_eq!(repo.port, None);
        assert_eq!(repo.repo_path, "group/repo");
    }

    #[test]
    fn test_http_port_is_kept() {
        let repo = parse_remote_uri("http://example.com:8080/group/repo").expect("should parse");
        assert_eq!(repo.port.as_deref(), Some("8080"));
        assert_eq!(repo.repo_path, "group/repo");
    }

    #[test]
    fn test_trailing_digits_are_a_path_not_a_port() {
        // No separator after the digits, so they fail the port scan and
        // the path scan captures them instead.
        let repo = parse_remote_uri("https://example.com:8443").expect("should parse");
        assert_eq!(repo.host, "example.com");
        assert_eq!(repo.port, None);
        assert_eq!(repo.repo_path, "8443");
    }

    #[test]
    fn test_unusual_scheme_is_accepted() {
        let repo = parse_remote_uri("ftp://host/path").expect("should parse");
        assert_eq!(repo.host, "host");
        assert_eq!(repo.repo_path, "path");
    }

    #[test]
    fn test_user_and_scheme_prefixes_stack() {
        let repo =
            parse_remote_uri("https://deploy@git.example.com/group/repo").expect("should parse");
        assert_eq!(repo.host, "git.example.com");
        assert_eq!(repo.repo_path, "group/repo");
    }

    #[test]
    fn test_tilde_path() {
        let repo = parse_remote_uri("git@example.com:~user/repo").expect("should parse");
        assert_eq!(repo.repo_path, "~user/repo");
    }

    #[test]
    fn test_absolute_path_after_colon() {
        let repo = parse_remote_uri("git@example.com:/srv/git/repo.git").expect("should parse");
        assert_eq!(repo.repo_path, "/srv/git/repo");
    }

    #[test]
    fn test_prefixless_string_accumulates_both_errors() {
        match parse_remote_uri("not-a-uri") {
            Err(Error::UriParse { messages, .. }) => {
                assert_eq!(
                    messages,
                    ["unsupported protocol format", "cannot parse the hostname"]
                );
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_path_fails() {
        match parse_remote_uri("https://example.com/") {
            Err(Error::UriParse { messages, .. }) => {
                assert_eq!(messages, ["cannot parse the repo path"]);
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_host_fails() {
        match parse_remote_uri("https://") {
            Err(Error::UriParse { messages, .. }) => {
                assert_eq!(messages, ["cannot parse the hostname"]);
            }
            other => panic!("expected parse failure, got {other:?}"),
        }
    }

    #[test]
    fn test_path_with_space_fails() {
        let result = parse_remote_uri("https://example.com/bad path");
        assert!(result.is_err());
    }

    #[test]
    fn test_case_is_preserved() {
        let repo = parse_remote_uri("git@Example.COM:Group/Repo").expect("should parse");
        assert_eq!(repo.host, "Example.COM");
        assert_eq!(repo.repo_path, "Group/Repo");
    }

    #[test]
    fn test_parse_is_deterministic() {
        let first = parse_remote_uri("git@example.com:group/repo.git").expect("should parse");
        let second = parse_remote_uri("git@example.com:group/repo.git").expect("should parse");
        assert_eq!(first, second);
    }
}
