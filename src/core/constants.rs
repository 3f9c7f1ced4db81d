//! Constants used throughout lockbox.
//!
//! Centralizes magic strings and configuration values.

/// Per-user lockbox directory relative to HOME (`~/.lockbox`).
pub const APP_DIR: &str = ".lockbox";

/// Key storage directory relative to the lockbox directory.
pub const KEY_DIR: &str = "keys";

/// Private key file name inside an identity directory.
pub const IDENTITY_FILE: &str = "identity.key";

/// Default store file name inside the lockbox directory.
pub const STORE_FILE: &str = "store.dat";

/// Config file name inside the lockbox directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Public k-anonymity range endpoint for breached passwords.
pub const DEFAULT_RANGE_ENDPOINT: &str = "https://api.pwnedpasswords.com/range";

/// Default length of auto-generated property values.
pub const DEFAULT_SECRET_LENGTH: usize = 32;

/// Number of leading hex characters sent to the range endpoint.
pub const HASH_PREFIX_LEN: usize = 5;

/// Permission mode for key and store files (Unix only).
pub const PRIVATE_FILE_MODE: u32 = 0o600;
