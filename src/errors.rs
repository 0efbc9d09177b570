// src/errors.rs

//! Crate-wide error aliases and helpers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LivetplError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LivetplError>;

/// Failure kinds reported per compile attempt.
///
/// These are the outcomes surfaced for a single template on the way from disk
/// to the output sink. A failure for one template never aborts the rest of a
/// recompilation batch; the coordinator logs each outcome independently.
#[derive(Error, Debug)]
pub enum CompileError {
    /// The template (or one of the files needed to render it) could not be read.
    #[error("failed to read {path}: {message}", path = .path.display())]
    Read { path: PathBuf, message: String },

    /// The renderer rejected the template (syntax error, unresolved
    /// include/extends reference, renderer-internal error).
    #[error("failed to render {path}: {message}", path = .path.display())]
    Render { path: PathBuf, message: String },

    /// Listing the template tree failed.
    #[error("failed to enumerate templates: {message}")]
    Enumeration { message: String },

    /// Writing the rendered output failed.
    #[error("failed to write {path}: {message}", path = .path.display())]
    Write { path: PathBuf, message: String },
}
