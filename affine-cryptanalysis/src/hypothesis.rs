//! Key hypotheses from ciphertext/English letter-pair correspondences
//!
//! Each hypothesis assumes two frequent ciphertext letters are the images of
//! two frequent English letters. With `C = a * P + b (mod 26)` that gives
//!
//! ```text
//! a * (p1 - p2) = c1 - c2   (mod 26)
//! b             = c1 - a * p1 (mod 26)
//! ```
//!
//! which is solved by trying the twelve admissible values of `a`.

use std::fmt;

use log::trace;
use serde::{Deserialize, Serialize};

use crate::affine::{AffineKey, Symbol};
use crate::frequency::top_letters;
use crate::modular::{modulo, ALPHABET_SIZE, VALID_A};

/// Most frequent English letters, most frequent first.
pub const ENGLISH_BY_FREQUENCY: [char; 6] = ['E', 'T', 'A', 'O', 'I', 'N'];

/// The letter mapping a hypothesis was derived from: `cipher[i] -> plain[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub cipher: [char; 2],
    pub plain: [char; 2],
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}→{}, {}→{}",
            self.cipher[0], self.plain[0], self.cipher[1], self.plain[1]
        )
    }
}

/// A candidate key not yet checked by decryption quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub key: AffineKey,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// How many top ciphertext letters are ranked.
    pub top_k: usize,
    /// How many of the top letters (on both sides) are paired up.
    pub pool: usize,
    /// English reference letters in canonical order. Entries that are not
    /// ASCII letters are skipped.
    pub reference: Vec<char>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            top_k: 6,
            pool: 3,
            reference: ENGLISH_BY_FREQUENCY.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Enumerates key hypotheses for `ciphertext` in generation order.
    ///
    /// Loop order is `c1, p1, c2, p2, a`. Duplicate keys coming from different
    /// letter pairs are all kept. A ciphertext with fewer than two distinct
    /// letters yields no hypotheses.
    pub fn generate(&self, ciphertext: &str) -> Vec<Hypothesis> {
        let ranked = top_letters(ciphertext, self.top_k);
        let cipher_pool: Vec<char> = ranked.into_iter().take(self.pool).collect();
        let plain_pool: Vec<char> = self
            .reference
            .iter()
            .filter_map(|&c| Symbol::parse(c).map(|_| c.to_ascii_uppercase()))
            .take(self.pool)
            .collect();

        let mut hypotheses = Vec::new();

        for &c1 in &cipher_pool {
            for &p1 in &plain_pool {
                for &c2 in &cipher_pool {
                    if c2 == c1 {
                        continue;
                    }
                    for &p2 in &plain_pool {
                        if p2 == p1 {
                            continue;
                        }
                        let provenance = Provenance {
                            cipher: [c1, c2],
                            plain: [p1, p2],
                        };
                        let keys = solve(
                            letter_value(c1),
                            letter_value(p1),
                            letter_value(c2),
                            letter_value(p2),
                        );
                        for key in keys {
                            trace!("hypothesis {} from {}", key, provenance);
                            hypotheses.push(Hypothesis { key, provenance });
                        }
                    }
                }
            }
        }

        hypotheses
    }
}

/// Generates hypotheses with the default configuration.
pub fn generate_hypotheses(ciphertext: &str) -> Vec<Hypothesis> {
    GeneratorConfig::default().generate(ciphertext)
}

/// All admissible keys sending plaintext `p1 -> c1` and `p2 -> c2`.
pub fn solve(c1: i64, p1: i64, c2: i64, p2: i64) -> Vec<AffineKey> {
    let target = modulo(c1 - c2, ALPHABET_SIZE);
    VALID_A
        .iter()
        .filter(|&&a| modulo(a * (p1 - p2), ALPHABET_SIZE) == target)
        .map(|&a| AffineKey::new(a, modulo(c1 - a * p1, ALPHABET_SIZE)))
        .collect()
}

// Pools only ever hold ASCII letters.
fn letter_value(c: char) -> i64 {
    Symbol::parse(c).map_or(0, |s| s.index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affine::encrypt_text;

    #[test]
    fn test_solve_recovers_key() {
        let key = AffineKey::new(7, 6);
        // E (4) -> 34 mod 26 = 8, T (19) -> 139 mod 26 = 9
        let keys = solve(8, 4, 9, 19);
        assert!(keys.contains(&key));
        for k in keys {
            assert_eq!(modulo(k.a * 4 + k.b, 26), 8);
            assert_eq!(modulo(k.a * 19 + k.b, 26), 9);
        }
    }

    #[test]
    fn test_solve_drops_non_coprime_solution() {
        // p1 - p2 = 4 - 0 is even: a and a + 13 both solve it, only odd ones coprime.
        let keys = solve(4, 4, 0, 0);
        assert_eq!(keys, vec![AffineKey::new(1, 0)]);
    }

    #[test]
    fn test_non_letter_reference_entries_are_skipped() {
        let config = GeneratorConfig {
            reference: vec!['3', 'e', 'é', 'T', ' ', 'A'],
            ..GeneratorConfig::default()
        };
        let hs = config.generate("XXXYYZ");
        assert_eq!(hs, generate_hypotheses("XXXYYZ"));

        let empty = GeneratorConfig {
            reference: vec!['1', '2', '?'],
            ..GeneratorConfig::default()
        };
        assert!(empty.generate("XXXYYZ").is_empty());
    }

    #[test]
    fn test_single_letter_yields_nothing() {
        assert!(generate_hypotheses("").is_empty());
        assert!(generate_hypotheses("QQQQ qqq !!").is_empty());
    }

    #[test]
    fn test_generation_order_and_provenance() {
        let hs = generate_hypotheses("XXXYYZ");
        assert!(!hs.is_empty());
        let first = hs[0].provenance;
        assert_eq!(first.cipher, ['X', 'Y']);
        assert_eq!(first.plain, ['E', 'T']);
        assert_eq!(first.to_string(), "X→E, Y→T");
        for h in &hs {
            assert!(h.key.is_valid());
            assert_ne!(h.provenance.cipher[0], h.provenance.cipher[1]);
            assert_ne!(h.provenance.plain[0], h.provenance.plain[1]);
        }
    }

    #[test]
    fn test_two_letters_use_only_their_pair() {
        let hs = generate_hypotheses("aab");
        for h in &hs {
            let pair = h.provenance.cipher;
            assert!(pair == ['A', 'B'] || pair == ['B', 'A']);
        }
    }

    #[test]
    fn test_tie_break_changes_pool() {
        // Four letters tied: first three seen form the pool, W never appears.
        let hs = generate_hypotheses("zyxw");
        assert!(hs.iter().all(|h| !h.provenance.cipher.contains(&'W')));
        let first = hs[0].provenance.cipher;
        assert_eq!(first[0], 'Z');
    }

    #[test]
    fn test_true_key_is_among_hypotheses() {
        let key = AffineKey::new(11, 10);
        let plain = "eeeeeeee tttttt aaaa the tea at ten";
        let cipher = encrypt_text(plain, key).unwrap();
        let hs = generate_hypotheses(&cipher);
        assert!(hs.iter().any(|h| h.key == key));
    }

    #[test]
    fn test_search_space_bound() {
        let hs = generate_hypotheses("the quick brown fox jumps over the lazy dog");
        assert!(hs.len() <= 3 * 3 * 2 * 2 * 12);
    }
}
