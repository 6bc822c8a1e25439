//! Typed failures reported by the catalog engine.

use std::path::PathBuf;

use thiserror::Error;

/// Defines errors that may occur while loading, editing or persisting a
/// translation catalog.
///
/// Diagnostic-carrying variants hold the raw message reported by the
/// underlying parser, validator or filesystem call; nothing is retried or
/// repaired internally.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The bound path does not end in the catalog file extension.
    #[error("catalog path must end in '.{expected}', got '{path}'")]
    InvalidPath {
        /// The required file extension (without the leading dot).
        expected: &'static str,
        /// The rejected path.
        path: String,
    },

    /// Reading or parsing the catalog file failed.
    #[error("failed to load catalog: {0}")]
    Load(String),

    /// The document does not conform to the catalog schema.
    #[error("catalog validation failed: {0}")]
    Validation(String),

    /// The schema resource could not be located. Always fatal; this is a
    /// deployment misconfiguration, not a property of the catalog.
    #[error("catalog schema not found at '{}'", .0.display())]
    SchemaMissing(PathBuf),

    /// Writing the catalog file failed.
    #[error("failed to write catalog: {0}")]
    Write(String),

    /// Creating the parent directory for a new catalog file failed.
    #[error("failed to create catalog directory: {0}")]
    DirectoryCreate(String),

    /// Writing a freshly bootstrapped catalog file failed.
    #[error("failed to create catalog file: {0}")]
    FileCreate(String),

    /// More than one context shares the same name. Only reachable through
    /// a hand-edited catalog file; never auto-resolved.
    #[error("multiple contexts found for '{0}'")]
    DuplicateContext(String),

    /// More than one message in one context shares the same source. Only
    /// reachable through a hand-edited catalog file; never auto-resolved.
    #[error("multiple messages found for '{0}'")]
    DuplicateMessage(String),
}
