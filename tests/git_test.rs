use std::io;
use std::path::Path;
use std::sync::Mutex;

use weft::error::{Error, Result};
use weft::git::GitClient;

/// Records every checkout attempt and succeeds only for the configured
/// revision kind.
struct RecordingClient {
    tag_name: String,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingClient {
    fn new(tag_name: &str) -> Self {
        Self { tag_name: tag_name.to_string(), calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn fail(&self, kind: &'static str) -> Result<()> {
        Err(Error::IoError(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no such {}", kind),
        )))
    }
}

impl GitClient for RecordingClient {
    fn clone_repo(&self, _host: &str, _owner: &str, _repo: &str, _dest: &Path) -> Result<()> {
        Ok(())
    }

    fn checkout_branch(&self, _dest: &Path, _name: &str) -> Result<()> {
        self.calls.lock().unwrap().push("branch");
        self.fail("branch")
    }

    fn checkout_tag(&self, _dest: &Path, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push("tag");
        if name == self.tag_name {
            Ok(())
        } else {
            self.fail("tag")
        }
    }

    fn checkout_commit(&self, _dest: &Path, _hash: &str) -> Result<()> {
        self.calls.lock().unwrap().push("commit");
        self.fail("commit")
    }

    fn default_branch(&self) -> &str {
        "main"
    }
}

#[test]
fn test_checkout_tries_branch_before_tag() {
    let client = RecordingClient::new("v1.0");

    client.checkout(Path::new("/nonexistent"), "v1.0").unwrap();

    // Exactly one failed branch attempt, then one successful tag attempt.
    assert_eq!(client.calls(), vec!["branch", "tag"]);
}

#[test]
fn test_checkout_falls_through_to_commit() {
    let client = RecordingClient::new("v1.0");

    let result = client.checkout(Path::new("/nonexistent"), "deadbeef");

    assert_eq!(client.calls(), vec!["branch", "tag", "commit"]);
    match result {
        Err(Error::CheckoutError { revision }) => assert_eq!(revision, "deadbeef"),
        other => panic!("Expected CheckoutError, got {:?}", other),
    }
}

#[test]
fn test_checkout_empty_revision_is_noop() {
    let client = RecordingClient::new("v1.0");

    client.checkout(Path::new("/nonexistent"), "").unwrap();

    assert!(client.calls().is_empty());
}
