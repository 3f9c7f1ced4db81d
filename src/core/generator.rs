//! Random secret generation.
//!
//! Each character is drawn by first picking a character class uniformly,
//! then a character uniformly from that class. Randomness comes from the
//! operating system CSPRNG, since generated values are stored as secrets.

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{GeneratorError, Result};

/// Lowercase ASCII letters.
pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Uppercase ASCII letters.
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// ASCII digits.
pub const DIGITS: &[u8] = b"0123456789";

/// ASCII punctuation, only drawn when special characters are requested.
pub const SPECIAL: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

const BASE_CLASSES: &[&[u8]] = &[LOWERCASE, UPPERCASE, DIGITS];
const ALL_CLASSES: &[&[u8]] = &[LOWERCASE, UPPERCASE, DIGITS, SPECIAL];

/// Character classes in play for a given setting.
pub fn classes(use_special_characters: bool) -> &'static [&'static [u8]] {
    if use_special_characters {
        ALL_CLASSES
    } else {
        BASE_CLASSES
    }
}

/// Generate a random string of `length` characters.
///
/// Draws from three classes (lowercase, uppercase, digits), or four when
/// `use_special_characters` adds ASCII punctuation.
///
/// # Errors
///
/// Returns `GeneratorError::InvalidLength` if `length` is zero.
pub fn generate(length: usize, use_special_characters: bool) -> Result<Zeroizing<String>> {
    if length == 0 {
        return Err(GeneratorError::InvalidLength(length).into());
    }

    debug!(length, special = use_special_characters, "generating secret");

    let classes = classes(use_special_characters);
    let mut rng = OsRng;
    let mut out = Zeroizing::new(String::with_capacity(length));

    for _ in 0..length {
        // Both choices are over non-empty slices.
        if let Some(class) = classes.choose(&mut rng) {
            if let Some(&ch) = class.choose(&mut rng) {
                out.push(ch as char);
            }
        }
    }

    Ok(out)
}
