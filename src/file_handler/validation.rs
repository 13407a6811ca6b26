//! File validation utilities for ensuring files can be followed.
//!
//! Logs usually start empty, so unlike a pager this accepts zero-length files.

use crate::error::{Result, TaildiffError};
use std::fs::File;
use std::path::Path;

/// Validate that a file path is accessible and suitable for following
///
/// # Validations Performed
/// - Path exists
/// - Path is a regular file (not a directory)
/// - File is readable by the current process
pub fn validate_file_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(TaildiffError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| TaildiffError::file_error("Failed to read file metadata", e))?;

    if !metadata.is_file() {
        return Err(TaildiffError::NotAFile {
            path: path.to_path_buf(),
        });
    }

    // Try to open the file to verify read permissions
    File::open(path).map_err(|e| TaildiffError::file_error("Cannot open file for reading", e))?;

    Ok(())
}
