//! Error handling for plant proximity operations.
//!
//! Parsing and selection are total functions and never produce these errors.
//! Failures come from the edges: fetching the inventory, loading
//! configuration, and reading position tracks.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlantError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to fetch plant inventory from {source_name}: {reason}")]
    SourceFetch { source_name: String, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid position on line {line}: {reason}")]
    InvalidPosition { line: usize, reason: String },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },
}

impl PlantError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a source fetch error
    pub fn source_fetch(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceFetch {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid position error for a 1-based line number
    pub fn invalid_position(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            line,
            reason: reason.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlantError>;
