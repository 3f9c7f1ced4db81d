//! Age protection backend.
//!
//! Encrypts to the public half of the user's own x25519 identity, so only
//! that identity can decrypt. Output is the binary age format; the store
//! layer adds the base64 text encoding.

use std::io::{Read, Write};
use std::path::Path;

use ::age::x25519;
use tracing::trace;

use super::{Identity, IdentityLabel, Protector};
use crate::error::{ProtectError, Result};

/// Age-based protector bound to one identity.
pub struct AgeProtector {
    identity: x25519::Identity,
    recipient: x25519::Recipient,
}

impl std::fmt::Debug for AgeProtector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeProtector")
            .field("recipient", &self.recipient.to_string())
            .finish()
    }
}

impl AgeProtector {
    /// Protector for the current `(user, host)`.
    ///
    /// Loads the identity from `~/.lockbox/keys/<user>@<host>/`, generating
    /// it on first use.
    ///
    /// # Errors
    ///
    /// Returns `ProtectError` if the key cannot be read or created.
    pub fn for_current_user() -> Result<Self> {
        let identity = Identity::load_or_generate_current()?;
        Ok(Self::from_identity(identity.into_age()))
    }

    /// Protector for the current `(user, host)` that never creates a key.
    ///
    /// # Errors
    ///
    /// Returns `ProtectError::NoKey` if this user has no identity yet.
    pub fn existing_for_current_user() -> Result<Self> {
        Self::load(&Identity::dir_for(&IdentityLabel::current())?)
    }

    /// Protector for the identity stored in `key_dir`, without generating.
    ///
    /// # Errors
    ///
    /// Returns `ProtectError::NoKey` if the directory holds no identity.
    pub fn load(key_dir: &Path) -> Result<Self> {
        let identity = Identity::load(key_dir)?;
        Ok(Self::from_identity(identity.into_age()))
    }

    /// Protector for an in-memory identity.
    pub fn from_identity(identity: x25519::Identity) -> Self {
        let recipient = identity.to_public();
        Self {
            identity,
            recipient,
        }
    }

    /// Protector with a fresh throwaway identity.
    pub fn ephemeral() -> Self {
        Self::from_identity(x25519::Identity::generate())
    }
}

impl Protector for AgeProtector {
    fn name(&self) -> &'static str {
        "age"
    }

    fn protect(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        trace!(plaintext_len = plaintext.len(), "protecting");

        let encryptor =
            age::Encryptor::with_recipients(std::iter::once(&self.recipient as &dyn age::Recipient))
                .map_err(|e| ProtectError::EncryptionFailed(format!("{}", e)))?;

        let mut encrypted = Vec::new();
        let mut writer = encryptor
            .wrap_output(&mut encrypted)
            .map_err(|e| ProtectError::EncryptionFailed(format!("{}", e)))?;

        writer
            .write_all(plaintext)
            .map_err(|e| ProtectError::EncryptionFailed(format!("{}", e)))?;
        writer
            .finish()
            .map_err(|e| ProtectError::EncryptionFailed(format!("{}", e)))?;

        trace!(ciphertext_len = encrypted.len(), "protected");
        Ok(encrypted)
    }

    fn unprotect(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        trace!(ciphertext_len = ciphertext.len(), "unprotecting");

        let decryptor = age::Decryptor::new(ciphertext)
            .map_err(|e| ProtectError::DecryptionFailed(format!("{}", e)))?;

        let mut reader = decryptor
            .decrypt(std::iter::once(&self.identity as &dyn age::Identity))
            .map_err(|e| ProtectError::DecryptionFailed(format!("{}", e)))?;

        let mut decrypted = Vec::new();
        reader
            .read_to_end(&mut decrypted)
            .map_err(|e| ProtectError::DecryptionFailed(format!("{}", e)))?;

        trace!(plaintext_len = decrypted.len(), "unprotected");
        Ok(decrypted)
    }
}
