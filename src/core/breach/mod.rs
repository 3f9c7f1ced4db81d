//! Password breach lookup by k-anonymity.
//!
//! The password is SHA-1 hashed locally; only the first five hex characters
//! of the digest are sent to the range index. The index answers with every
//! known suffix under that prefix and the match happens here, so neither the
//! password nor its full digest leaves the machine.

mod range;

use sha1::{Digest, Sha1};
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::constants::HASH_PREFIX_LEN;
use crate::error::Result;

pub use range::{check_endpoint, parse_range, HttpRangeSource, RangeEntry, RangeSource};

/// Outcome of a breach check.
///
/// `times_seen` is zero exactly when `is_breached` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BreachVerdict {
    pub is_breached: bool,
    pub times_seen: u64,
}

impl BreachVerdict {
    /// Verdict for a password absent from the index.
    pub const CLEAN: Self = Self {
        is_breached: false,
        times_seen: 0,
    };

    fn seen(times: u64) -> Self {
        if times == 0 {
            Self::CLEAN
        } else {
            Self {
                is_breached: true,
                times_seen: times,
            }
        }
    }
}

/// Uppercase hex SHA-1 of the password, split into (prefix, suffix).
pub fn digest_parts(password: &str) -> (String, Zeroizing<String>) {
    let digest = Zeroizing::new(hex::encode_upper(Sha1::digest(password.as_bytes())));
    let (prefix, suffix) = digest.split_at(HASH_PREFIX_LEN);
    (prefix.to_string(), Zeroizing::new(suffix.to_string()))
}

/// Breach checker over a range source.
#[derive(Debug)]
pub struct BreachChecker<S: RangeSource> {
    source: S,
}

impl<S: RangeSource> BreachChecker<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Check a password against the range index.
    ///
    /// The first entry whose suffix matches (ignoring case) decides the
    /// verdict. Padding entries with a zero count never count as a breach.
    ///
    /// # Errors
    ///
    /// Returns `BreachError::TransportUnavailable` if the index cannot be
    /// reached and `BreachError::MalformedIndexResponse` if its body does
    /// not parse.
    pub fn check(&self, password: &str) -> Result<BreachVerdict> {
        let (prefix, suffix) = digest_parts(password);
        debug!(prefix = %prefix, "querying range index");

        let body = self.source.fetch(&prefix)?;
        let entries = parse_range(&body)?;
        debug!(prefix = %prefix, candidates = entries.len(), "range received");

        let verdict = entries
            .iter()
            .find(|e| e.suffix.eq_ignore_ascii_case(&suffix))
            .map(|e| BreachVerdict::seen(e.count))
            .unwrap_or(BreachVerdict::CLEAN);

        debug!(breached = verdict.is_breached, "breach check complete");
        Ok(verdict)
    }
}
