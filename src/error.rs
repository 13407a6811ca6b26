//! Error types and handling infrastructure for taildiff.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for argument checks.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors end up on the status line, keep them readable
//! - **Context preservation**: Include the path or window involved
//! - **Consistency**: Standardized Result type across all modules

use crate::window::PageRange;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for taildiff operations.
#[derive(Error, Debug)]
pub enum TaildiffError {
    /// File system related errors (file not found, permission denied, etc.)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found specifically (common case for user feedback)
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Path exists but is not a regular file
    #[error("Path is not a regular file: {path}")]
    NotAFile { path: PathBuf },

    /// The change notifier could not watch a directory
    #[error("Watch failed: {message}")]
    WatchError { message: String },

    /// A window diff was requested against a smaller window
    #[error("Window cannot shrink from {current} to {requested} through a diff")]
    ShrinkingWindow {
        current: PageRange,
        requested: PageRange,
    },

    /// A window diff was requested against a window larger on both ends
    #[error("Window cannot grow on both ends from {current} to {requested} through a diff")]
    TwoSidedGrowth {
        current: PageRange,
        requested: PageRange,
    },

    /// The view worker is gone
    #[error("View worker unavailable")]
    WorkerUnavailable,

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Settings file could not be read or written
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for taildiff operations.
pub type Result<T> = std::result::Result<T, TaildiffError>;

impl TaildiffError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a WatchError with a descriptive message
    pub fn watch(message: impl Into<String>) -> Self {
        Self::WatchError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Automatic conversion from io::Error to TaildiffError
impl From<std::io::Error> for TaildiffError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

impl From<notify::Error> for TaildiffError {
    fn from(err: notify::Error) -> Self {
        Self::watch(err.to_string())
    }
}
