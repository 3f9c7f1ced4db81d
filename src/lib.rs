//! Lockbox - a per-user encrypted property store with breach checks.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── store         # new, list, get, set, generate, rm
//! │   ├── check         # Breach check and password generation
//! │   ├── prompt        # Hidden input and confirmation
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── config        # ~/.lockbox/config.toml
//!     ├── document      # Decrypted property map
//!     ├── store         # Encrypted store file (load, mutate, save)
//!     ├── protect/      # Per-user protection backends
//!     │   ├── mod       # Protector trait
//!     │   ├── age       # age x25519 implementation
//!     │   └── identity  # Per-(user, host) key files
//!     ├── generator     # Random secret values
//!     └── breach/       # k-anonymity password breach lookup
//! ```
//!
//! # Example
//!
//! ```no_run
//! use lockbox::{AgeProtector, SecretStore};
//!
//! # fn main() -> lockbox::error::Result<()> {
//! let store = SecretStore::new("/tmp/store.dat", AgeProtector::for_current_user()?);
//! store.create(false)?;
//! store.set_property("github_token", "ghp_example")?;
//! let token = store.get_property("github_token")?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::breach::{BreachChecker, BreachVerdict, HttpRangeSource, RangeSource};
pub use crate::core::document::SecretDocument;
pub use crate::core::protect::{AgeProtector, Protector};
pub use crate::core::store::{DeleteOutcome, SecretStore, SetOutcome};
