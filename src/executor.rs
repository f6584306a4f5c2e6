//! Template namespace and rendering.
//! The Executor owns a shared collection of named, parsed MiniJinja
//! templates and the extension-function set they render with.

use crate::error::{Error, Result};
use crate::funcs;
use crate::git::SharedGitClient;
use minijinja::Environment;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Name used for anonymous templates rendered from literal strings.
const INLINE_TEMPLATE_NAME: &str = "<string>";

/// A registry of named templates sharing one extension-function set.
///
/// Templates are registered under filesystem paths or logical names;
/// re-registering a name replaces the prior definition. The function set
/// is fixed at construction: the default string utilities plus either the
/// live `embed`/`import` functions (when a git token is available) or
/// stubs that fail with a fixed missing-credential error.
pub struct Executor {
    env: Environment<'static>,
}

impl Executor {
    /// Creates an Executor without remote access; `embed` and `import`
    /// fail closed with a missing-credential error.
    pub fn new() -> Self {
        let mut env = Environment::new();
        funcs::register_default_functions(&mut env);
        funcs::register_missing_token_functions(&mut env);
        Self { env }
    }

    /// Creates an Executor whose `embed` and `import` functions resolve
    /// remote references through the given client, materializing imports
    /// under `output_root`.
    pub fn with_remote(client: SharedGitClient, output_root: PathBuf) -> Self {
        let mut env = Environment::new();
        funcs::register_default_functions(&mut env);
        funcs::register_remote_functions(&mut env, client, output_root);
        Self { env }
    }

    /// Registers templates found at `path`.
    ///
    /// A file registers one template named by its path; a directory
    /// registers one template per contained file. Directories themselves
    /// are never registered.
    ///
    /// # Errors
    /// * `Error::ProcessError` naming the path if it cannot be read
    /// * `Error::SyntaxError` if a template fails to parse
    pub fn register_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)
            .map_err(|e| Error::process("reading", path, e.into()))?;

        if !metadata.is_dir() {
            return self.register_file(path);
        }

        for entry in WalkDir::new(path) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            if entry.file_type().is_dir() {
                continue;
            }
            self.register_file(entry.path())?;
        }

        Ok(())
    }

    /// Parses `source` and registers it under `name`, replacing any
    /// prior definition.
    pub fn register_source(&mut self, name: String, source: String) -> Result<()> {
        self.env
            .add_template_owned(name.clone(), source)
            .map_err(|source| Error::SyntaxError { name, source })
    }

    /// Executes the named template against `data`.
    ///
    /// # Errors
    /// * `Error::RenderError` if the name is unknown or evaluation fails
    pub fn render<S: Serialize>(&self, name: &str, data: &S) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|source| Error::RenderError { name: name.to_string(), source })?;

        template
            .render(data)
            .map_err(|source| Error::RenderError { name: name.to_string(), source })
    }

    /// Renders a single named block of the given template.
    pub fn render_fragment<S: Serialize>(
        &self,
        name: &str,
        fragment: &str,
        data: &S,
    ) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|source| Error::RenderError { name: name.to_string(), source })?;

        template
            .eval_to_state(data)
            .and_then(|mut state| state.render_block(fragment))
            .map_err(|source| Error::RenderError { name: fragment.to_string(), source })
    }

    /// Renders a literal template string against `data` under a fixed
    /// transient name; used for path segments, where the template is
    /// usually just a plain filename with no directives.
    pub fn render_string<S: Serialize>(&self, literal: &str, data: &S) -> Result<String> {
        self.env.render_str(literal, data).map_err(|source| Error::RenderError {
            name: INLINE_TEMPLATE_NAME.to_string(),
            source,
        })
    }

    fn register_file(&mut self, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::process("reading", path, e.into()))?;
        self.register_source(path.to_string_lossy().into_owned(), content)
    }
}

impl Default for Executor {
    fn default() -> Self {
        Executor::new()
    }
}
