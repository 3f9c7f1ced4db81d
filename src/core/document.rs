//! Secret document type.
//!
//! The decrypted contents of a store: a flat map of property names to
//! plaintext values. Serialized as a compact JSON object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use zeroize::Zeroize;

use crate::core::types::{PropertyName, PropertyValue};
use crate::error::{Result, StoreError};

/// A flat map of named secrets.
///
/// Iteration order is by name but callers must not depend on it.
/// Values are wiped from memory when the document is dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SecretDocument {
    properties: BTreeMap<PropertyName, PropertyValue>,
}

impl SecretDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a property with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Value of a property, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Insert or overwrite a property.
    ///
    /// Returns `true` if an existing value was replaced.
    pub fn set(&mut self, name: impl Into<PropertyName>, value: impl Into<PropertyValue>) -> bool {
        match self.properties.insert(name.into(), value.into()) {
            Some(mut old) => {
                old.zeroize();
                true
            }
            None => false,
        }
    }

    /// Remove a property, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.properties.remove(name) {
            Some(mut old) => {
                old.zeroize();
                true
            }
            None => false,
        }
    }

    /// Property names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the document has no properties.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Serialize to compact JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::SerializationFailed` if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let bytes = serde_json::to_vec(self)
            .map_err(|e| StoreError::SerializationFailed(e.to_string()))?;
        trace!(properties = self.len(), bytes = bytes.len(), "document serialized");
        Ok(bytes)
    }

    /// Parse a document from decrypted JSON bytes.
    ///
    /// The input must be a JSON object whose values are all strings and
    /// whose keys are all non-empty.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::CorruptStore` on any schema mismatch.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let doc: Self = serde_json::from_slice(bytes)
            .map_err(|e| StoreError::CorruptStore(format!("invalid document: {}", e)))?;

        if doc.properties.keys().any(|k| k.is_empty()) {
            return Err(StoreError::CorruptStore("empty property name".to_string()).into());
        }

        trace!(properties = doc.len(), "document parsed");
        Ok(doc)
    }
}

impl std::fmt::Debug for SecretDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecretDocument")
            .field("names", &self.properties.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Drop for SecretDocument {
    fn drop(&mut self) {
        for value in self.properties.values_mut() {
            value.zeroize();
        }
    }
}

impl<K, V> FromIterator<(K, V)> for SecretDocument
where
    K: Into<PropertyName>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
