//! File validation utilities for ensuring files are suitable for mapping.
//!
//! This module provides validation functions to check that files can be safely
//! mapped by hugeview before attempting to open them for reading.

use crate::error::{HugeviewError, Result};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for mapping
///
/// # Validations Performed
/// - Path exists and is a regular file
/// - File is not empty (a zero-length file cannot be mapped)
/// - File is readable by the current process
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(HugeviewError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| HugeviewError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(HugeviewError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    validate_file_size(metadata.len(), path)?;

    File::open(path).map_err(|e| HugeviewError::file_error("Cannot open file for reading", e))?;

    Ok(())
}

/// Check the size constraint shared by path-based and handle-based opening.
///
/// Only empty files are refused; any non-empty size is left to the mapping.
pub(crate) fn validate_file_size(file_size: u64, path: &Path) -> Result<()> {
    if file_size == 0 {
        return Err(HugeviewError::file_error(
            format!("File is empty: {}", path.display()),
            std::io::Error::new(std::io::ErrorKind::InvalidData, "Empty file"),
        ));
    }

    Ok(())
}
