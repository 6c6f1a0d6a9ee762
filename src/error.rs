//! Error types and handling infrastructure for hugeview.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary wraps these with `anyhow` for context at the top level.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should provide actionable feedback
//! - **Context preservation**: Include relevant information for debugging
//! - **Consistency**: Standardized Result type across all modules
//!
//! Navigation never fails: out-of-range offsets are clamped instead of reported.
//! Only opening a file, compiling a pattern and terminal I/O produce errors.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hugeview operations.
#[derive(Error, Debug)]
pub enum HugeviewError {
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

    /// Memory mapping related errors
    #[error("Memory mapping failed: {message}")]
    MemoryMappingError { message: String },

    /// A byte read was requested past the end of the mapping
    #[error("Offset {offset} is out of bounds (file size: {size})")]
    OffsetOutOfBounds { offset: u64, size: u64 },

    /// The regular expression could not be compiled
    #[error("Invalid pattern '{pattern}': {message}")]
    PatternError { pattern: String, message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// A value typed by the user that cannot be used
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

/// Standard Result type for hugeview operations.
pub type Result<T> = std::result::Result<T, HugeviewError>;

impl HugeviewError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a MemoryMappingError with a descriptive message
    pub fn memory_mapping(message: impl Into<String>) -> Self {
        Self::MemoryMappingError {
            message: message.into(),
        }
    }

    /// Create a PatternError for the given source pattern
    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PatternError {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an InvalidArgument error with a descriptive message
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for HugeviewError {
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
