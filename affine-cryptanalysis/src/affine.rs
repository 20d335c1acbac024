//! Affine transform: `C = (a * P + b) mod 26` and its inverse

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AffineError, Result};
use crate::modular::{inverse_mod26, is_coprime, modulo, ALPHABET_SIZE};

/// Affine cipher key `(a, b)`.
///
/// A key is only usable when `a` is in `1..=25` and coprime with 26, and `b`
/// is in `0..=25`. Invalid keys can still be built with [`AffineKey::new`] so
/// callers can report them, but every transform rejects them. Untrusted input
/// goes through `TryFrom<(i64, i64)>`, which serde uses as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "KeyParts")]
pub struct AffineKey {
    pub a: i64,
    pub b: i64,
}

#[derive(Deserialize)]
struct KeyParts {
    a: i64,
    b: i64,
}

impl AffineKey {
    pub fn new(a: i64, b: i64) -> Self {
        Self { a, b }
    }

    /// `true` if both parts are in range and `a` is coprime with 26.
    pub fn is_valid(&self) -> bool {
        self.in_range() && is_coprime(self.a, ALPHABET_SIZE)
    }

    fn in_range(&self) -> bool {
        (1..ALPHABET_SIZE).contains(&self.a) && (0..ALPHABET_SIZE).contains(&self.b)
    }

    /// Multiplicative inverse of `a`, or `KeyOutOfRange` / `InvalidKey`.
    ///
    /// Every transform goes through here first, so no out-of-range part ever
    /// reaches the letter arithmetic.
    pub fn a_inverse(&self) -> Result<i64> {
        if !self.in_range() {
            return Err(AffineError::KeyOutOfRange {
                a: self.a,
                b: self.b,
            });
        }
        inverse_mod26(self.a).ok_or(AffineError::InvalidKey { a: self.a })
    }

    /// Encrypts a whole text under this key.
    pub fn encrypt(&self, text: &str) -> Result<String> {
        encrypt_text(text, *self)
    }

    /// Decrypts a whole text under this key.
    pub fn decrypt(&self, text: &str) -> Result<String> {
        decrypt_text(text, *self)
    }
}

impl TryFrom<(i64, i64)> for AffineKey {
    type Error = AffineError;

    fn try_from((a, b): (i64, i64)) -> Result<Self> {
        let key = Self::new(a, b);
        key.a_inverse()?;
        Ok(key)
    }
}

impl TryFrom<KeyParts> for AffineKey {
    type Error = AffineError;

    fn try_from(parts: KeyParts) -> Result<Self> {
        Self::try_from((parts.a, parts.b))
    }
}

impl fmt::Display for AffineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a={}, b={}", self.a, self.b)
    }
}

/// A letter occurrence: alphabet index plus its case flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub index: i64,
    pub upper: bool,
}

impl Symbol {
    /// Parses an ASCII letter. Anything else is not a symbol of the alphabet.
    pub fn parse(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        Some(Self {
            index: (c.to_ascii_uppercase() as u8 - b'A') as i64,
            upper: c.is_ascii_uppercase(),
        })
    }

    /// Same case, different letter.
    pub fn with_index(self, index: i64) -> Self {
        Self {
            index: modulo(index, ALPHABET_SIZE),
            upper: self.upper,
        }
    }

    pub fn to_char(self) -> char {
        let base = if self.upper { b'A' } else { b'a' };
        (base + modulo(self.index, ALPHABET_SIZE) as u8) as char
    }
}

/// Decrypts a single character.
///
/// Non-letters pass through unchanged whatever the key. Letters are mapped
/// with `P = a_inv * (C - b) mod 26`, keeping their case.
pub fn decrypt_symbol(c: char, key: AffineKey) -> Result<char> {
    match Symbol::parse(c) {
        None => Ok(c),
        Some(symbol) => {
            let a_inv = key.a_inverse()?;
            Ok(decrypt_with_inverse(symbol, a_inv, key.b))
        }
    }
}

/// Encrypts a single character with `C = a * P + b mod 26`.
pub fn encrypt_symbol(c: char, key: AffineKey) -> Result<char> {
    match Symbol::parse(c) {
        None => Ok(c),
        Some(symbol) => {
            key.a_inverse()?;
            Ok(symbol.with_index(key.a * symbol.index + key.b).to_char())
        }
    }
}

/// Decrypts `text` under `key`.
///
/// The key is validated once up front, so an invalid key fails even for texts
/// without any letters.
///
/// # Example
///
/// ```rust
/// use affine_cryptanalysis::{decrypt_text, AffineKey};
///
/// let key = AffineKey::new(11, 10);
/// assert_eq!(decrypt_text("Kkrub!", key).unwrap(), "Aadil!");
/// ```
pub fn decrypt_text(text: &str, key: AffineKey) -> Result<String> {
    let a_inv = key.a_inverse()?;
    Ok(text
        .chars()
        .map(|c| match Symbol::parse(c) {
            Some(symbol) => decrypt_with_inverse(symbol, a_inv, key.b),
            None => c,
        })
        .collect())
}

/// Encrypts `text` under `key`. Fails with `InvalidKey` for non-invertible keys.
pub fn encrypt_text(text: &str, key: AffineKey) -> Result<String> {
    key.a_inverse()?;
    Ok(text
        .chars()
        .map(|c| match Symbol::parse(c) {
            Some(symbol) => symbol.with_index(key.a * symbol.index + key.b).to_char(),
            None => c,
        })
        .collect())
}

fn decrypt_with_inverse(symbol: Symbol, a_inv: i64, b: i64) -> char {
    symbol.with_index(a_inv * (symbol.index - b)).to_char()
}
