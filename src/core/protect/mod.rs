//! Per-user protection of the store blob.
//!
//! A [`Protector`] turns plaintext bytes into ciphertext that only the same
//! protection identity can turn back. The production binding is an age
//! x25519 identity generated once per `(user, host)` and kept in the user's
//! home directory.
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Protector` trait
//! 2. Add the implementation in a new file
//! 3. Re-export from this module

use crate::error::Result;

mod age;
mod identity;

pub use self::age::AgeProtector;
pub use identity::{Identity, IdentityLabel};

/// Protection capability.
///
/// `unprotect` must fail with `ProtectError::DecryptionFailed` when the
/// ciphertext was produced under a different identity.
pub trait Protector {
    /// Encrypt bytes under this protector's identity.
    ///
    /// # Errors
    ///
    /// Returns `ProtectError::EncryptionFailed` if encryption fails.
    fn protect(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt bytes previously produced by `protect`.
    ///
    /// # Errors
    ///
    /// Returns `ProtectError::DecryptionFailed` on identity mismatch or
    /// damaged ciphertext.
    fn unprotect(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// Backend name for display.
    fn name(&self) -> &'static str;
}

impl<P: Protector + ?Sized> Protector for &P {
    fn protect(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        (**self).protect(plaintext)
    }

    fn unprotect(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        (**self).unprotect(ciphertext)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
