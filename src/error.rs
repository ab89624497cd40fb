//! Error types for check-node-types.
//!
//! This module defines [`CheckError`], the error type used by the manifest
//! loader and the CLI layer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Manifest problems are returned as `CheckError` by the loader and then
//!   turned into a warning outcome by [`crate::checker::reconcile`]; they
//!   never escape the engine
//! - Only the CLI layer surfaces errors to `main`, e.g. a failed write

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for check-node-types operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The manifest could not be read from disk.
    #[error("Could not read {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid JSON.
    #[error("Could not parse {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The manifest is the JSON literal `null`, which has no fields to read.
    #[error("Manifest at {path} is null")]
    ManifestNull { path: PathBuf },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for check-node-types operations.
pub type Result<T> = std::result::Result<T, CheckError>;
