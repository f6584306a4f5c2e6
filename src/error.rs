//! Error handling for the weft application.
//! Defines custom error types and results used throughout the application.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Custom error types for weft operations.
///
/// This enum represents all possible errors that can occur while parsing
/// references, talking to git, and rendering template trees. It implements
/// the standard Error trait through thiserror's derive macro.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    /// Represents errors raised by the underlying git library
    #[error("Git error: {0}")]
    Git2Error(#[from] git2::Error),

    /// Represents errors that occur while decoding the input data
    #[error("Invalid input data: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Represents a malformed remote reference string
    #[error("Invalid reference '{reference}': {reason}")]
    ParseError { reference: String, reason: String },

    /// Represents a failed repository clone
    #[error("Failed to clone repository '{url}': {source}")]
    CloneError {
        url: String,
        #[source]
        source: git2::Error,
    },

    /// Represents a revision that resolved to neither a branch, a tag,
    /// nor a commit hash
    #[error("Failed to check out revision '{revision}': no matching branch, tag or commit")]
    CheckoutError { revision: String },

    /// Represents a template that failed to parse
    #[error("Failed to parse template '{name}': {source}")]
    SyntaxError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Represents a template that failed to evaluate
    #[error("Failed to render template '{name}': {source}")]
    RenderError {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    /// Wraps a failure inside the tree walk with the offending path
    /// and the stage it failed at
    #[error("Error {stage} '{path}': {source}")]
    ProcessError {
        stage: &'static str,
        path: String,
        #[source]
        source: Box<Error>,
    },

    /// Returned when embed or import is invoked without a git token
    #[error("embed and import functions require a git token")]
    MissingTokenError,
}

impl Error {
    /// Wraps an error with the offending path and the stage it failed
    /// at, so failures are diagnosable without a debugger.
    pub fn process(stage: &'static str, path: &Path, source: Error) -> Self {
        Error::ProcessError {
            stage,
            path: path.display().to_string(),
            source: Box::new(source),
        }
    }
}

/// Convenience type alias for Results with weft's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(1);
}
