//! Recursive tree rendering.
//! Walks an input directory, treats every path segment and every file's
//! content as a template, and writes the rendered tree to an output
//! directory while preserving relative structure and permission modes.

use crate::constants::SKIP_PREFIX;
use crate::error::{Error, Result};
use crate::executor::Executor;
use log::debug;
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Renders the tree rooted at `input_dir` into `output_dir`.
///
/// Entry base names are rendered as templates before they are used as
/// output path segments, so output paths can depend on the input data.
/// Entries whose rendered name is empty or starts with `-` are excluded;
/// for directories the whole subtree is excluded. The input root itself
/// never becomes a segment of an output path. Pre-existing output
/// entries are overwritten.
///
/// # Errors
/// Any read, parse, render or write failure aborts the walk, wrapped
/// with the offending path and the stage it failed at.
pub fn generate<S: Serialize>(
    executor: &mut Executor,
    input_dir: &Path,
    output_dir: &Path,
    data: &S,
) -> Result<()> {
    fs::create_dir_all(output_dir)
        .map_err(|e| Error::process("writing", output_dir, e.into()))?;

    let mut walker = WalkDir::new(input_dir).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| Error::IoError(e.into()))?;
        let path = entry.path().to_path_buf();
        let is_dir = entry.file_type().is_dir();

        let base_name = entry.file_name().to_string_lossy().into_owned();
        let rendered_name = executor
            .render_string(&base_name, data)
            .map_err(|e| Error::process("rendering", &path, e))?;

        // Skip rule: exclude entries rendering to an empty or '-' prefixed
        // name; for directories the whole subtree is excluded.
        if rendered_name.is_empty() || rendered_name.starts_with(SKIP_PREFIX) {
            debug!("Skipping '{}' (rendered name '{}')", path.display(), rendered_name);
            if is_dir {
                walker.skip_current_dir();
            }
            continue;
        }

        // The root entry has no parent inside the input tree.
        let rel_dir = if entry.depth() == 0 {
            Path::new("")
        } else {
            path.parent()
                .and_then(|parent| parent.strip_prefix(input_dir).ok())
                .unwrap_or_else(|| Path::new(""))
        };

        // Directory names themselves may depend on data.
        let rendered_rel_dir = executor
            .render_string(&rel_dir.to_string_lossy(), data)
            .map_err(|e| Error::process("rendering", &path, e))?;

        let candidate = output_dir.join(rendered_rel_dir).join(&rendered_name);

        let metadata = entry.metadata().map_err(|e| Error::IoError(e.into()))?;

        if is_dir {
            // Root rule: the input root itself produces no output entry.
            if candidate.file_name() == input_dir.file_name() {
                continue;
            }

            debug!("Creating directory '{}'", candidate.display());
            fs::create_dir_all(&candidate)
                .and_then(|()| fs::set_permissions(&candidate, metadata.permissions()))
                .map_err(|e| Error::process("writing", &candidate, e.into()))?;
            continue;
        }

        let bytes =
            fs::read(&path).map_err(|e| Error::process("reading", &path, e.into()))?;

        let rendered = match String::from_utf8(bytes) {
            Ok(content) => {
                let template_name = path.to_string_lossy().into_owned();
                executor
                    .register_source(template_name.clone(), content)
                    .map_err(|e| Error::process("parsing", &path, e))?;

                executor
                    .render(&template_name, data)
                    .map_err(|e| Error::process("rendering", &path, e))?
                    .into_bytes()
            }
            // Binary assets pass through untouched.
            Err(raw) => raw.into_bytes(),
        };

        debug!("Writing file '{}'", candidate.display());
        fs::write(&candidate, rendered)
            .and_then(|()| fs::set_permissions(&candidate, metadata.permissions()))
            .map_err(|e| Error::process("writing", &candidate, e.into()))?;
    }

    Ok(())
}
