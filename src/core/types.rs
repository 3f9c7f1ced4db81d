//! Type aliases for domain concepts.
//!
//! Provides semantic type aliases to make function signatures more descriptive.

/// A property name (e.g., `github_token`).
///
/// Non-empty and unique within a document.
pub type PropertyName = String;

/// A plaintext property value. May be empty.
pub type PropertyValue = String;

/// Base64 text of the protected document, as stored on disk.
pub type EncryptedBlob = String;
