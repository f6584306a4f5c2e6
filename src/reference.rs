//! Remote reference notation parsing.
//! A reference identifies a repository, an optional path within it, an
//! optional named fragment and an optional revision using the compact
//! `[scheme://]host/owner/repo[/path][#fragment][@revision]` notation.

use crate::error::{Error, Result};
use std::fmt;
use url::Url;

/// A parsed remote reference.
///
/// `owner` and `repo` are always non-empty after a successful parse;
/// `path`, `fragment` and `revision` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReference {
    /// Repository hosting authority (e.g. "github.com")
    pub host: String,
    /// Repository owner or organization
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Path to a file or directory within the repository
    pub path: String,
    /// Named fragment (block) inside the referenced template
    pub fragment: String,
    /// Branch name, tag name or commit hash
    pub revision: String,
}

impl RemoteReference {
    /// Parses a compact reference string.
    ///
    /// A revision may be attached to the repo or path segment
    /// (`owner/repo@v1`, `owner/repo/path@v1`) or to the fragment
    /// (`#block@v1`); the fragment-carried revision wins when both
    /// are present.
    ///
    /// # Arguments
    /// * `raw` - Reference string, with or without an URL scheme
    ///
    /// # Errors
    /// * `Error::ParseError` if the URL is malformed or the path holds
    ///   fewer than two segments (owner and repo)
    pub fn parse(raw: &str) -> Result<Self> {
        let with_scheme = if raw.starts_with("http://") || raw.starts_with("https://") {
            raw.to_string()
        } else {
            format!("https://{}", raw)
        };

        let url = Url::parse(&with_scheme).map_err(|e| Error::ParseError {
            reference: raw.to_string(),
            reason: e.to_string(),
        })?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };

        let (fragment, fragment_revision) = split_at_sign(url.fragment().unwrap_or(""));

        let trimmed = url.path().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(Error::ParseError {
                reference: raw.to_string(),
                reason: "invalid path format".to_string(),
            });
        }

        let owner = segments[0].to_string();
        let mut repo = segments[1].to_string();
        let mut path = segments[2..].join("/");

        // A revision suffixed onto the path or repo segment is always
        // stripped; a fragment-carried revision wins over it.
        let mut embedded_revision = String::new();
        if path.contains('@') {
            (path, embedded_revision) = split_at_sign(&path);
        } else if repo.contains('@') {
            (repo, embedded_revision) = split_at_sign(&repo);
        }

        let revision = if fragment_revision.is_empty() {
            embedded_revision
        } else {
            fragment_revision
        };

        Ok(Self { host, owner, repo, path, fragment, revision })
    }
}

impl fmt::Display for RemoteReference {
    /// Serializes the reference back into the compact notation,
    /// omitting empty components and their separators.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.host.is_empty() {
            write!(f, "{}/", self.host)?;
        }
        write!(f, "{}/{}", self.owner, self.repo)?;
        if !self.path.is_empty() {
            write!(f, "/{}", self.path)?;
        }
        if !self.fragment.is_empty() {
            write!(f, "#{}", self.fragment)?;
        }
        if !self.revision.is_empty() {
            write!(f, "@{}", self.revision)?;
        }
        Ok(())
    }
}

/// Splits the given string at the first '@' sign and returns both parts.
fn split_at_sign(s: &str) -> (String, String) {
    match s.split_once('@') {
        Some((head, tail)) => (head.to_string(), tail.to_string()),
        None => (s.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reference() {
        let parsed =
            RemoteReference::parse("https://github.com/owner/repo/path/to/file#block@v1.2.3")
                .unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.owner, "owner");
        assert_eq!(parsed.repo, "repo");
        assert_eq!(parsed.path, "path/to/file");
        assert_eq!(parsed.fragment, "block");
        assert_eq!(parsed.revision, "v1.2.3");
    }

    #[test]
    fn test_parse_without_scheme() {
        let parsed = RemoteReference::parse("github.com/owner/repo").unwrap();
        assert_eq!(parsed.host, "github.com");
        assert_eq!(parsed.owner, "owner");
        assert_eq!(parsed.repo, "repo");
        assert!(parsed.path.is_empty());
        assert!(parsed.fragment.is_empty());
        assert!(parsed.revision.is_empty());
    }

    #[test]
    fn test_parse_revision_in_path() {
        let parsed =
            RemoteReference::parse("https://github.com/owner/repo/path/to/file@v1.2.3").unwrap();
        assert_eq!(parsed.path, "path/to/file");
        assert_eq!(parsed.revision, "v1.2.3");
        assert!(parsed.fragment.is_empty());
    }

    #[test]
    fn test_parse_revision_in_repo() {
        let parsed = RemoteReference::parse("https://github.com/owner/repo@v1.2.3").unwrap();
        assert_eq!(parsed.repo, "repo");
        assert_eq!(parsed.revision, "v1.2.3");
        assert!(parsed.path.is_empty());
    }

    #[test]
    fn test_fragment_revision_wins() {
        let parsed =
            RemoteReference::parse("github.com/owner/repo/path@v1#block@v2").unwrap();
        assert_eq!(parsed.fragment, "block");
        assert_eq!(parsed.revision, "v2");
        assert_eq!(parsed.path, "path");
    }

    #[test]
    fn test_parse_missing_repo() {
        let result = RemoteReference::parse("https://github.com/owner");
        assert!(matches!(result, Err(Error::ParseError { .. })));
    }

    #[test]
    fn test_round_trip() {
        let raw = "github.com/owner/repo/path/to/file#block@v1.2.3";
        let parsed = RemoteReference::parse(raw).unwrap();
        assert_eq!(parsed.to_string(), raw);
    }

    #[test]
    fn test_round_trip_omits_empty_components() {
        let parsed = RemoteReference::parse("github.com/owner/repo").unwrap();
        assert_eq!(parsed.to_string(), "github.com/owner/repo");

        let parsed = RemoteReference::parse("github.com/owner/repo@v1").unwrap();
        assert_eq!(parsed.to_string(), "github.com/owner/repo@v1");
    }
}
