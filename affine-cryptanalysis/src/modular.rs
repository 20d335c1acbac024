//! Modular arithmetic over the 26-letter alphabet

/// Size of the alphabet every affine operation works modulo.
pub const ALPHABET_SIZE: i64 = 26;

/// The twelve multipliers that are coprime with 26.
pub const VALID_A: [i64; 12] = [1, 3, 5, 7, 9, 11, 15, 17, 19, 21, 23, 25];

/// Reduces `value` into `[0, modulus)`, also for negative inputs.
pub fn modulo(value: i64, modulus: i64) -> i64 {
    value.rem_euclid(modulus)
}

/// Greatest common divisor (always non-negative).
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut x, mut y) = (a.abs(), b.abs());
    while y != 0 {
        let t = x % y;
        x = y;
        y = t;
    }
    x
}

/// Returns `true` if `a` and `m` share no factor other than 1.
pub fn is_coprime(a: i64, m: i64) -> bool {
    gcd(a, m) == 1
}

/// Finds the modular multiplicative inverse of `a` modulo `m`.
///
/// Searches `1..m` for the unique `i` with `(a * i) mod m == 1`. `a` does not
/// have to be reduced beforehand.
///
/// # Returns
///
/// `None` when `a` and `m` are not coprime, or when `m < 2`.
///
/// # Example
///
/// ```rust
/// use affine_cryptanalysis::modular::mod_inverse;
///
/// assert_eq!(mod_inverse(11, 26), Some(19));
/// assert_eq!(mod_inverse(13, 26), None);
/// ```
pub fn mod_inverse(a: i64, m: i64) -> Option<i64> {
    if m < 2 {
        return None;
    }
    let reduced = modulo(a, m);
    (1..m).find(|&i| (reduced * i) % m == 1)
}

/// Shorthand for [`mod_inverse`] modulo 26.
pub fn inverse_mod26(a: i64) -> Option<i64> {
    mod_inverse(a, ALPHABET_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inverse_for_every_valid_multiplier() {
        for &a in VALID_A.iter() {
            let inv = inverse_mod26(a).unwrap();
            assert!((1..26).contains(&inv));
            assert_eq!((a * inv) % 26, 1, "a = {}", a);
        }
    }

    #[test]
    fn test_inverse_missing_for_non_coprime() {
        for a in 0..26 {
            if !VALID_A.contains(&a) {
                assert_eq!(inverse_mod26(a), None, "a = {}", a);
            }
        }
    }

    #[test]
    fn test_inverse_is_involution() {
        for &a in VALID_A.iter() {
            let inv = inverse_mod26(a).unwrap();
            assert_eq!(inverse_mod26(inv), Some(a));
        }
    }

    #[test]
    fn test_unreduced_and_negative_input() {
        // 37 = 11 mod 26, -15 = 11 mod 26
        assert_eq!(inverse_mod26(37), Some(19));
        assert_eq!(inverse_mod26(-15), Some(19));
        assert_eq!(inverse_mod26(39), None);
    }

    #[test]
    fn test_modulo_never_negative() {
        assert_eq!(modulo(-8, 26), 18);
        assert_eq!(modulo(-26, 26), 0);
        assert_eq!(modulo(27, 26), 1);
    }

    #[test]
    fn test_valid_a_matches_coprime_set() {
        let coprime: Vec<i64> = (1..26).filter(|&a| is_coprime(a, 26)).collect();
        assert_eq!(coprime, VALID_A.to_vec());
    }
}
