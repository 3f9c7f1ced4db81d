//! Protection identity.
//!
//! Wraps an age private key stored under `~/.lockbox/keys/<user>@<host>/`.
//! The key never leaves the machine it was generated on, which is what
//! binds a store to one user on one host.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use age::secrecy::ExposeSecret;
use age::x25519;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::constants;
#[cfg(unix)]
use crate::core::validation;
use crate::error::{ProtectError, Result};

/// The `(user, host)` pair an identity is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityLabel {
    pub user: String,
    pub host: String,
}

impl IdentityLabel {
    /// Label for the running process.
    pub fn current() -> Self {
        let host = whoami::fallible::hostname().unwrap_or_else(|_| "localhost".to_string());
        Self {
            user: whoami::username(),
            host,
        }
    }

    /// Directory name for this label, with path separators removed.
    fn dir_name(&self) -> String {
        format!("{}@{}", self.user, self.host)
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect()
    }
}

impl std::fmt::Display for IdentityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.user, self.host)
    }
}

/// A private key identity for the protection layer
pub struct Identity {
    inner: x25519::Identity,
    path: PathBuf,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("public_key", &self.public_key())
            .field("path", &self.path)
            .finish()
    }
}

impl Identity {
    /// Load the current user's identity, generating one on first use.
    pub fn load_or_generate_current() -> Result<Self> {
        let dir = Self::dir_for(&IdentityLabel::current())?;
        if Self::exists(&dir) {
            Self::load(&dir)
        } else {
            Self::generate(&dir)
        }
    }

    /// Whether `key_dir` holds an identity file.
    pub fn exists(key_dir: &Path) -> bool {
        key_dir.join(constants::IDENTITY_FILE).exists()
    }

    /// Load an identity from the key directory
    pub fn load(key_dir: &Path) -> Result<Self> {
        let key_path = key_dir.join(constants::IDENTITY_FILE);
        debug!(path = %key_path.display(), "loading identity");

        if !key_path.exists() {
            return Err(ProtectError::NoKey(key_dir.display().to_string()).into());
        }

        #[cfg(unix)]
        {
            if let Err(e) =
                validation::validate_file_permissions(&key_path, constants::PRIVATE_FILE_MODE)
            {
                warn!(path = %key_path.display(), error = %e, "insecure key file permissions");
            }
        }

        let contents = fs::read_to_string(&key_path).map_err(ProtectError::KeyReadFailed)?;

        let inner: x25519::Identity = contents
            .trim()
            .parse()
            .map_err(|e: &str| ProtectError::InvalidKey(e.to_string()))?;

        debug!("identity loaded");

        Ok(Self {
            inner,
            path: key_path,
        })
    }

    /// Generate a new identity and save it to `key_dir`.
    ///
    /// The key is written to a 0600 temp file and linked into place only if
    /// no identity exists yet. If another process got there first, its key
    /// is loaded instead, so an existing key is never replaced.
    pub fn generate(key_dir: &Path) -> Result<Self> {
        debug!(path = %key_dir.display(), "generating new identity");

        fs::create_dir_all(key_dir).map_err(ProtectError::KeyWriteFailed)?;
        let key_path = key_dir.join(constants::IDENTITY_FILE);

        let inner = x25519::Identity::generate();

        let mut tmp = NamedTempFile::new_in(key_dir).map_err(ProtectError::KeyWriteFailed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file()
                .set_permissions(fs::Permissions::from_mode(constants::PRIVATE_FILE_MODE))
                .map_err(ProtectError::KeyWriteFailed)?;
        }

        let secret_str = inner.to_string();
        writeln!(tmp, "{}", secret_str.expose_secret()).map_err(ProtectError::KeyWriteFailed)?;
        tmp.as_file()
            .sync_all()
            .map_err(ProtectError::KeyWriteFailed)?;

        match tmp.persist_noclobber(&key_path) {
            Ok(_) => {
                debug!(path = %key_path.display(), "identity saved");
                Ok(Self {
                    inner,
                    path: key_path,
                })
            }
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %key_path.display(), "identity already present, loading it");
                Self::load(key_dir)
            }
            Err(e) => Err(ProtectError::KeyWriteFailed(e.error).into()),
        }
    }

    /// Corresponding public key
    pub fn public_key(&self) -> String {
        self.inner.to_public().to_string()
    }

    /// Key file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume into the inner age identity.
    pub fn into_age(self) -> x25519::Identity {
        self.inner
    }

    /// Base directory for all lockbox keys (`~/.lockbox/keys`)
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ProtectError::NoHomeDir)?;
        Ok(home.join(constants::APP_DIR).join(constants::KEY_DIR))
    }

    /// Key directory for a given `(user, host)`.
    pub fn dir_for(label: &IdentityLabel) -> Result<PathBuf> {
        Ok(Self::base_dir()?.join(label.dir_name()))
    }
}
