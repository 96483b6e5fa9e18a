//! Error handling for grafe.
//! Every variant is fatal to a build run; callers propagate with `?` and the
//! binary reports the error and exits.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Custom error types for grafe operations.
#[derive(Error, Debug)]
pub enum Error {
    /// File system failure without further context
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// File system failure tied to a specific path
    #[error("Failed to {action} '{path}': {source}.")]
    FileError {
        action: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    /// Unreadable entry met while walking a tree with the fail-fast policy
    #[error("Directory traversal error: {0}.")]
    WalkError(#[from] walkdir::Error),

    /// Template compilation or rendering failure
    #[error("Template error: {0}.")]
    MinijinjaError(#[from] minijinja::Error),

    /// A page names a layout that was never registered
    #[error("The template {template} does not exist.")]
    MissingTemplate { template: String },

    /// Front matter that is not a YAML mapping
    #[error("Invalid front matter in '{path}': {message}.")]
    FrontMatterError { path: String, message: String },

    /// Front matter key present with the wrong type
    #[error("Invalid metadata in '{path}': {message}.")]
    MetadataError { path: String, message: String },

    /// Required front matter key absent
    #[error("Missing required metadata field '{field}' in '{path}'.")]
    MissingMetadata { field: &'static str, path: String },

    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Invalid pattern in the project ignore file
    #[error("Ignore file error: {0}.")]
    IgnoreError(String),

    #[error("Transpilation of '{path}' failed: {message}.")]
    TranspileError { path: String, message: String },

    #[error("Server error: {0}.")]
    ServeError(String),

    #[error("Invalid path: {0}.")]
    InvalidPath(String),
}

impl Error {
    /// Wraps an [`io::Error`] with the action and path that produced it.
    pub fn file<P: AsRef<Path>>(action: &'static str, path: P, source: io::Error) -> Self {
        Error::FileError { action, path: path.as_ref().display().to_string(), source }
    }
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that logs the error and exits the program.
///
/// # Behavior
/// Logs the error message and exits with status code 1
pub fn default_error_handler(err: Error) {
    log::error!("{err}");
    std::process::exit(1);
}
