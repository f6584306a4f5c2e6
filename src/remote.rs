//! Remote fragment resolution.
//! Composes the reference parser, the git client and the tree walker to
//! materialize a remote path or fragment into the current rendering
//! context, either inline (`embed`) or onto disk (`import`).

use crate::constants::TEMP_DIR_PREFIX;
use crate::error::{Error, Result};
use crate::executor::Executor;
use crate::git::{GitClient, SharedGitClient};
use crate::reference::RemoteReference;
use crate::walker;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Renders a remote path or named fragment and returns the result
/// inline.
///
/// The repository is cloned into a temporary directory which is removed
/// when this function returns, on success and failure alike. Checkout is
/// skipped when the reference carries no revision or the revision equals
/// the client's default branch, since the clone already sits on it.
pub fn embed<S: Serialize>(
    client: &SharedGitClient,
    output_root: &Path,
    reference: &str,
    data: &S,
) -> Result<String> {
    let dep = RemoteReference::parse(reference)?;

    let temp_dir = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
    client.clone_repo(&dep.host, &dep.owner, &dep.repo, temp_dir.path())?;

    let revision = resolve_revision(client.as_ref(), &dep);
    if revision != client.default_branch() {
        client.checkout(temp_dir.path(), &revision)?;
    }

    let template_path = temp_dir.path().join(&dep.path);

    // Register every template next to the referenced one, so the
    // fragment may refer to siblings through includes.
    let parse_root = if dep.path.is_empty() {
        temp_dir.path().to_path_buf()
    } else {
        template_path.parent().unwrap_or(temp_dir.path()).to_path_buf()
    };

    let mut executor = Executor::with_remote(client.clone(), output_root.to_path_buf());
    executor.register_from_path(&parse_root)?;

    let name = template_path.to_string_lossy();
    if dep.fragment.is_empty() {
        executor.render(&name, data)
    } else if dep.path.is_empty() {
        executor.render(&dep.fragment, data)
    } else {
        executor.render_fragment(&name, &dep.fragment, data)
    }
}

/// Materializes a remote file or directory under
/// `output_root/dest_subpath`.
///
/// A referenced file is rendered and written under its own base name
/// with the source file's permission mode; a referenced directory goes
/// through the full tree walk. The temporary clone directory is removed
/// on every exit path.
pub fn import<S: Serialize>(
    client: &SharedGitClient,
    output_root: &Path,
    reference: &str,
    dest_subpath: &str,
    data: &S,
) -> Result<()> {
    let dep = RemoteReference::parse(reference)?;

    let temp_dir = tempfile::Builder::new().prefix(TEMP_DIR_PREFIX).tempdir()?;
    client.clone_repo(&dep.host, &dep.owner, &dep.repo, temp_dir.path())?;

    let revision = resolve_revision(client.as_ref(), &dep);
    client.checkout(temp_dir.path(), &revision)?;

    let source_path = temp_dir.path().join(&dep.path);
    let dest_path = output_root.join(dest_subpath);

    debug!("Importing '{}' to '{}'", dep, dest_path.display());

    let mut executor = Executor::with_remote(client.clone(), output_root.to_path_buf());

    let metadata = fs::metadata(&source_path)
        .map_err(|e| Error::process("reading", &source_path, e.into()))?;

    if metadata.is_dir() {
        return walker::generate(&mut executor, &source_path, &dest_path, data);
    }

    let content = fs::read_to_string(&source_path)
        .map_err(|e| Error::process("reading", &source_path, e.into()))?;
    let name = source_path.to_string_lossy().into_owned();
    executor.register_source(name.clone(), content)?;
    let rendered = executor.render(&name, data)?;

    fs::create_dir_all(&dest_path)
        .map_err(|e| Error::process("writing", &dest_path, e.into()))?;
    let target = dest_path.join(source_path.file_name().unwrap_or_default());
    fs::write(&target, rendered)
        .and_then(|()| fs::set_permissions(&target, metadata.permissions()))
        .map_err(|e| Error::process("writing", &target, e.into()))?;

    Ok(())
}

/// The reference's revision, or the client's default when it carries
/// none.
fn resolve_revision(client: &(dyn GitClient + Send + Sync), dep: &RemoteReference) -> String {
    if dep.revision.is_empty() {
        client.default_branch().to_string()
    } else {
        dep.revision.clone()
    }
}
