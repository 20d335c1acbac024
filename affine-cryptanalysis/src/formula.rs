//! Direct key derivation from a per-message tag
//!
//! Keys in the analysed corpus follow `a = 2t + 1`, `b = 2t` for the tag `t`
//! (the sender's mood). Only tags producing an `a` coprime with 26 are usable;
//! every tag is checked before use.

use crate::affine::{decrypt_text, AffineKey};
use crate::error::{AffineError, Result};
use crate::modular::VALID_A;

/// Derives `(a, b) = (2t + 1, 2t)` from `tag`.
///
/// # Example
///
/// ```rust
/// use affine_cryptanalysis::{derive_key, AffineError, AffineKey};
///
/// assert_eq!(derive_key(5), Ok(AffineKey::new(11, 10)));
/// assert_eq!(derive_key(6), Err(AffineError::FormulaInapplicable { tag: 6, a: 13 }));
/// ```
pub fn derive_key(tag: i64) -> Result<AffineKey> {
    let a = tag.saturating_mul(2).saturating_add(1);
    if !VALID_A.contains(&a) {
        return Err(AffineError::FormulaInapplicable { tag, a });
    }
    Ok(AffineKey::new(a, 2 * tag))
}

/// Decrypts `ciphertext` with the key derived from `tag`.
pub fn universal_decrypt(ciphertext: &str, tag: i64) -> Result<String> {
    let key = derive_key(tag)?;
    decrypt_text(ciphertext, key)
}

/// `true` if `key` is exactly what the formula gives for `tag`.
pub fn matches_formula(tag: i64, key: AffineKey) -> bool {
    derive_key(tag).map_or(false, |derived| derived == key)
}
