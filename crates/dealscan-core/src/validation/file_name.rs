//! File-name validation.
//!
//! File names become lookup keys within a batch and feed into export
//! filenames, so they must be plain names: no path separators, no traversal
//! sequences, bounded length.

use crate::error::AppError;

pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Validate a staged file name. Returns the offending rule in the error.
pub fn validate_file_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::Validation("file name is empty".to_string()));
    }

    if name.len() > MAX_FILE_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "file name exceeds {} characters",
            MAX_FILE_NAME_LENGTH
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(AppError::Validation(format!(
            "file name contains a path separator: {}",
            name
        )));
    }

    if name == "." || name == ".." {
        return Err(AppError::Validation(format!(
            "file name is not a plain name: {}",
            name
        )));
    }

    if name.contains('\0') {
        return Err(AppError::Validation(
            "file name contains a NUL byte".to_string(),
        ));
    }

    Ok(())
}
