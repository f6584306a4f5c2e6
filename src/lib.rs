//! weft is a template-driven file-tree generator.
//! It renders a directory of templates into an output tree, treating both
//! file names and file contents as templates, and can pull named fragments
//! or whole directory trees from remote git repositories through the
//! `embed` and `import` template functions.

/// Command-line interface module for the weft application
pub mod cli;

/// Common constants used throughout the application
pub mod constants;

/// Error types and handling for the weft application
pub mod error;

/// The registry of named templates and the rendering entry points
pub mod executor;

/// The default template extension functions
pub mod funcs;

/// Git client abstraction: clone and revision checkout
pub mod git;

/// Logger configuration
pub mod logger;

/// Remote reference notation parsing
pub mod reference;

/// Remote fragment resolution: the embed and import operations
pub mod remote;

/// Recursive tree rendering into an output directory
pub mod walker;
