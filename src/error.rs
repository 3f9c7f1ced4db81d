//! Error types for lockbox.
//!
//! Each concern owns its own error enum; the top-level [`Error`] wraps them
//! so callers can match on the exact failure (retry, abort, or notify).

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Protect(#[from] ProtectError),

    #[error(transparent)]
    Breach(#[from] BreachError),

    #[error(transparent)]
    Generator(#[from] GeneratorError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the encrypted store file.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("no store found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("store already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("cannot write store at {}: {source}", .path.display())]
    PathUnwritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot read store at {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store is corrupt: {0}")]
    CorruptStore(String),

    #[error("failed to serialize store: {0}")]
    SerializationFailed(String),

    #[error("property not found: {0}")]
    PropertyNotFound(String),
}

/// Failures of the per-user protection layer.
#[derive(Error, Debug)]
pub enum ProtectError {
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("no protection key at {0}")]
    NoKey(String),

    #[error("protection key is malformed: {0}")]
    InvalidKey(String),

    #[error("failed to read protection key: {0}")]
    KeyReadFailed(#[source] std::io::Error),

    #[error("failed to write protection key: {0}")]
    KeyWriteFailed(#[source] std::io::Error),

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Failures of the remote breach lookup.
#[derive(Error, Debug)]
pub enum BreachError {
    #[error("breach index unavailable: {0}")]
    TransportUnavailable(String),

    #[error("malformed breach index response at line {line}: {reason}")]
    MalformedIndexResponse { line: usize, reason: String },
}

/// Failures of the random secret generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("invalid length {0}: must be at least 1")]
    InvalidLength(usize),
}

/// Rejected user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("property name cannot be empty")]
    EmptyName,

    #[error("invalid property name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("{0} is required in non-interactive mode")]
    NonInteractive(&'static str),

    #[error("invalid file permissions on {path}: expected {expected}, found {actual}")]
    InvalidPermissions {
        path: String,
        expected: String,
        actual: String,
    },
}

/// Failures loading `~/.lockbox/config.toml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
