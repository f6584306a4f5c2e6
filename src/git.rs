//! Git client abstraction and its libgit2-backed implementation.
//! Covers exactly two concerns: cloning a repository into a local
//! directory and moving a checked-out working tree to a revision.

use crate::constants::DEFAULT_BRANCH;
use crate::error::{Error, Result};
use log::debug;
use std::path::Path;

/// Capability interface over a git backend.
///
/// A revision string is ambiguous among branch name, tag name and commit
/// hash; the provided `checkout` method resolves it by trying the three
/// interpretations in that fixed order and accepting the first success.
pub trait GitClient {
    /// Clones the repository's default branch into `dest`.
    fn clone_repo(&self, host: &str, owner: &str, repo: &str, dest: &Path) -> Result<()>;

    /// Checks out a remote branch by name.
    fn checkout_branch(&self, dest: &Path, name: &str) -> Result<()>;

    /// Checks out a tag by name.
    fn checkout_tag(&self, dest: &Path, name: &str) -> Result<()>;

    /// Checks out a commit by hash.
    fn checkout_commit(&self, dest: &Path, hash: &str) -> Result<()>;

    /// The branch used when a reference carries no revision.
    fn default_branch(&self) -> &str;

    /// Moves the working tree at `dest` to `revision`.
    ///
    /// Tries branch, then tag, then commit hash; the order is fixed for
    /// compatibility with existing reference strings, so a branch shadows
    /// a tag of the same name. An empty revision is a no-op since the
    /// clone already sits on the default branch.
    ///
    /// # Errors
    /// * `Error::CheckoutError` when all three interpretations fail
    fn checkout(&self, dest: &Path, revision: &str) -> Result<()> {
        if revision.is_empty() {
            return Ok(());
        }

        match self.checkout_branch(dest, revision) {
            Ok(()) => return Ok(()),
            Err(e) => debug!("Revision '{}' is not a branch: {}", revision, e),
        }
        match self.checkout_tag(dest, revision) {
            Ok(()) => return Ok(()),
            Err(e) => debug!("Revision '{}' is not a tag: {}", revision, e),
        }
        match self.checkout_commit(dest, revision) {
            Ok(()) => return Ok(()),
            Err(e) => debug!("Revision '{}' is not a commit: {}", revision, e),
        }

        Err(Error::CheckoutError { revision: revision.to_string() })
    }
}

/// Shared handle to a git client, as captured by the template extension
/// functions.
pub type SharedGitClient = std::sync::Arc<dyn GitClient + Send + Sync>;

/// Git client backed by libgit2 with optional token authentication
/// over HTTPS.
pub struct Git2Client {
    token: Option<String>,
    default_branch: String,
}

impl Git2Client {
    /// Creates a new Git2Client.
    ///
    /// # Arguments
    /// * `token` - Access token for private repositories, if any
    /// * `default_branch` - Branch used when no revision is given;
    ///   falls back to "main" when unset
    pub fn new(token: Option<String>, default_branch: Option<String>) -> Self {
        Self {
            token,
            default_branch: default_branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        }
    }

    /// Builds the clone URL for a repository, adding the https scheme
    /// unless the host already carries one.
    fn repo_url(host: &str, owner: &str, repo: &str) -> String {
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/{}/{}.git", host, owner, repo)
        } else {
            format!("https://{}/{}/{}.git", host, owner, repo)
        }
    }

    /// Checks out the commit a revparse spec resolves to, detaching HEAD.
    fn checkout_spec(dest: &Path, spec: &str) -> Result<()> {
        let repo = git2::Repository::open(dest)?;
        let commit = repo.revparse_single(spec)?.peel_to_commit()?;

        let mut opts = git2::build::CheckoutBuilder::new();
        opts.force();
        repo.checkout_tree(commit.as_object(), Some(&mut opts))?;
        repo.set_head_detached(commit.id())?;

        Ok(())
    }
}

impl GitClient for Git2Client {
    /// Clones a repository to the given destination.
    ///
    /// # Errors
    /// * `Error::CloneError` naming the constructed URL if the clone fails
    fn clone_repo(&self, host: &str, owner: &str, repo: &str, dest: &Path) -> Result<()> {
        let url = Self::repo_url(host, owner, repo);

        debug!("Cloning '{}' to '{}'.", url, dest.display());

        // Set up authentication callbacks
        let mut callbacks = git2::RemoteCallbacks::new();
        if let Some(token) = self.token.clone() {
            callbacks.credentials(move |_url, username_from_url, _allowed_types| {
                git2::Cred::userpass_plaintext(username_from_url.unwrap_or("git"), &token)
            });
        }

        // Configure fetch options with callbacks
        let mut fetch_opts = git2::FetchOptions::new();
        fetch_opts.remote_callbacks(callbacks);

        // Set up and perform clone
        let mut builder = git2::build::RepoBuilder::new();
        builder.fetch_options(fetch_opts);

        match builder.clone(&url, dest) {
            Ok(_) => Ok(()),
            Err(source) => Err(Error::CloneError { url, source }),
        }
    }

    fn checkout_branch(&self, dest: &Path, name: &str) -> Result<()> {
        Self::checkout_spec(dest, &format!("refs/remotes/origin/{}", name))
    }

    fn checkout_tag(&self, dest: &Path, name: &str) -> Result<()> {
        Self::checkout_spec(dest, &format!("refs/tags/{}", name))
    }

    fn checkout_commit(&self, dest: &Path, hash: &str) -> Result<()> {
        Self::checkout_spec(dest, hash)
    }

    fn default_branch(&self) -> &str {
        &self.default_branch
    }
}
