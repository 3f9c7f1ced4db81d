//! Input validation for lockbox operations.

use crate::error::{Result, ValidationError};

/// Validate a property name.
///
/// Names must be non-empty and may not contain control characters
/// (they are printed one per line by `list`).
///
/// # Errors
///
/// Returns `ValidationError` if the name is invalid.
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }

    if let Some((i, ch)) = name.char_indices().find(|(_, c)| c.is_control()) {
        return Err(ValidationError::InvalidName {
            name: name.escape_debug().to_string(),
            reason: format!(
                "control character {:?} at position {}",
                ch,
                i + 1
            ),
        }
        .into());
    }

    Ok(())
}

/// Validate file permissions (Unix only).
///
/// # Errors
///
/// Returns `ValidationError` if permissions don't match.
#[cfg(unix)]
pub fn validate_file_permissions(path: &std::path::Path, expected_mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = std::fs::metadata(path)?;
    let actual_mode = metadata.permissions().mode() & 0o777;

    if actual_mode != expected_mode {
        return Err(ValidationError::InvalidPermissions {
            path: path.display().to_string(),
            expected: format!("{:o}", expected_mode),
            actual: format!("{:o}", actual_mode),
        }
        .into());
    }

    Ok(())
}
