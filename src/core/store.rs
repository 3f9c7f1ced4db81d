//! The encrypted store file.
//!
//! A store is one file holding base64 text of the protected, serialized
//! [`SecretDocument`]. Every mutation is a full load, mutate, save cycle;
//! nothing is cached between calls.
//!
//! Writes go to a temporary file in the destination directory and are
//! renamed into place, so a crash leaves either the old or the new store.
//! Concurrent writers are not arbitrated: the last rename wins.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::document::SecretDocument;
use crate::core::generator;
use crate::core::protect::Protector;
use crate::core::types::EncryptedBlob;
use crate::core::validation::validate_name;
use crate::error::{Result, StoreError};

/// Result of deleting a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The property existed and the store was rewritten without it.
    Removed,
    /// The property did not exist; the store was left untouched.
    NotFound,
}

/// Result of setting a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    Created,
    Updated,
}

/// An encrypted store at a fixed path.
pub struct SecretStore<P: Protector> {
    path: PathBuf,
    protector: P,
}

impl<P: Protector> std::fmt::Debug for SecretStore<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretStore")
            .field("path", &self.path)
            .field("protector", &self.protector.name())
            .finish()
    }
}

impl<P: Protector> SecretStore<P> {
    /// Bind a store path to a protector. Touches nothing on disk.
    pub fn new(path: impl Into<PathBuf>, protector: P) -> Self {
        Self {
            path: path.into(),
            protector,
        }
    }

    /// Store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the store file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create a store holding an empty document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if a store exists and `force` is false.
    /// Returns `StoreError::PathUnwritable` if the file cannot be written.
    pub fn create(&self, force: bool) -> Result<()> {
        if self.exists() && !force {
            return Err(StoreError::AlreadyExists(self.path.clone()).into());
        }

        info!(path = %self.path.display(), "creating store");
        self.write(&SecretDocument::new())
    }

    /// Load and decrypt the document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if there is no file at the path.
    /// Returns `ProtectError::DecryptionFailed` if this identity cannot decrypt it.
    /// Returns `StoreError::CorruptStore` if the file is not a valid blob or
    /// the plaintext is not a flat string map.
    pub fn read(&self) -> Result<SecretDocument> {
        debug!(path = %self.path.display(), "reading store");

        let blob: EncryptedBlob = match fs::read_to_string(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()).into());
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(StoreError::CorruptStore("store is not text".to_string()).into());
            }
            Err(source) => {
                return Err(StoreError::ReadFailed {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        let ciphertext = STANDARD
            .decode(blob.trim())
            .map_err(|e| StoreError::CorruptStore(format!("invalid base64: {}", e)))?;

        let plaintext = Zeroizing::new(self.protector.unprotect(&ciphertext)?);
        let document = SecretDocument::from_bytes(&plaintext)?;

        debug!(properties = document.len(), "store loaded");
        Ok(document)
    }

    /// Encrypt and persist a document, replacing the file atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SerializationFailed` if the document cannot be serialized.
    /// Returns `StoreError::PathUnwritable` if the file cannot be written.
    pub fn write(&self, document: &SecretDocument) -> Result<()> {
        debug!(path = %self.path.display(), properties = document.len(), "writing store");

        let plaintext = Zeroizing::new(document.to_bytes()?);
        let ciphertext = self.protector.protect(&plaintext)?;
        let blob: EncryptedBlob = STANDARD.encode(ciphertext);

        self.persist(blob.as_bytes())
            .map_err(|source| StoreError::PathUnwritable {
                path: self.path.clone(),
                source,
            })?;

        debug!("store written");
        Ok(())
    }

    /// Read a single property value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::PropertyNotFound` if the name is absent.
    pub fn get_property(&self, name: &str) -> Result<Zeroizing<String>> {
        let document = self.read()?;
        document
            .get(name)
            .map(|v| Zeroizing::new(v.to_string()))
            .ok_or_else(|| StoreError::PropertyNotFound(name.to_string()).into())
    }

    /// Names of all properties.
    pub fn list_properties(&self) -> Result<Vec<String>> {
        let document = self.read()?;
        Ok(document.names().map(str::to_string).collect())
    }

    /// Insert or overwrite a property.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the name is invalid, plus any error of
    /// [`read`](Self::read) or [`write`](Self::write).
    pub fn set_property(&self, name: &str, value: &str) -> Result<SetOutcome> {
        validate_name(name)?;

        let mut document = self.read()?;
        let outcome = if document.set(name, value) {
            SetOutcome::Updated
        } else {
            SetOutcome::Created
        };
        self.write(&document)?;

        info!(property = name, ?outcome, "property set");
        Ok(outcome)
    }

    /// Remove a property.
    ///
    /// Callers are responsible for confirming the deletion first. An absent
    /// property is reported as [`DeleteOutcome::NotFound`] and the file is
    /// not rewritten.
    pub fn delete_property(&self, name: &str) -> Result<DeleteOutcome> {
        let mut document = self.read()?;
        if !document.remove(name) {
            debug!(property = name, "property absent, store untouched");
            return Ok(DeleteOutcome::NotFound);
        }
        self.write(&document)?;

        info!(property = name, "property deleted");
        Ok(DeleteOutcome::Removed)
    }

    /// Set a property to a freshly generated random value.
    ///
    /// Returns the generated value.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::InvalidLength` if `length` is zero, plus any
    /// error of [`set_property`](Self::set_property).
    pub fn auto_set_property(
        &self,
        name: &str,
        length: usize,
        use_special_characters: bool,
    ) -> Result<Zeroizing<String>> {
        let value = generator::generate(length, use_special_characters)?;
        self.set_property(name, &value)?;
        Ok(value)
    }

    fn persist(&self, contents: &[u8]) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // NamedTempFile is created 0600 on Unix.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
