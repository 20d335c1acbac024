//! Letter frequency profiling and Index of Coincidence

use serde::{Deserialize, Serialize};

use crate::affine::Symbol;

/// English letter frequencies in percent, A to Z.
pub const ENGLISH_FREQUENCIES: [f64; 26] = [
    8.17, 1.29, 2.78, 4.25, 12.70, 2.23, 2.02, 6.09, 6.97, 0.15, 0.77, 4.03, 2.41,
    6.75, 7.51, 1.93, 0.10, 5.99, 6.33, 9.06, 2.76, 0.98, 2.36, 0.15, 1.97, 0.07,
];

/// Per-letter counts and relative frequencies (percent) of a text sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyProfile {
    pub counts: [u32; 26],
    pub frequencies: [f64; 26],
    pub total: u32,
}

/// One row of the observed-vs-English comparison table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub letter: char,
    pub count: u32,
    pub frequency: f64,
    pub english: f64,
    pub difference: f64,
}

impl FrequencyProfile {
    pub fn count(&self, letter: char) -> u32 {
        letter_index(letter).map_or(0, |i| self.counts[i])
    }

    pub fn frequency(&self, letter: char) -> f64 {
        letter_index(letter).map_or(0.0, |i| self.frequencies[i])
    }

    /// Rows sorted by descending observed frequency, alphabetical on ties.
    pub fn comparison(&self) -> Vec<ComparisonRow> {
        let mut rows: Vec<ComparisonRow> = (0..26)
            .map(|i| ComparisonRow {
                letter: (b'A' + i as u8) as char,
                count: self.counts[i],
                frequency: self.frequencies[i],
                english: ENGLISH_FREQUENCIES[i],
                difference: self.frequencies[i] - ENGLISH_FREQUENCIES[i],
            })
            .collect();
        rows.sort_by(|x, y| y.frequency.total_cmp(&x.frequency));
        rows
    }
}

/// Counts the frequency of each letter in the given text, case-insensitively.
///
/// # Returns
///
/// An array of 26 counts for letters A-Z.
pub fn count_letters(text: &str) -> [u32; 26] {
    let mut counts: [u32; 26] = [0; 26];
    for symbol in text.chars().filter_map(Symbol::parse) {
        counts[symbol.index as usize] += 1;
    }
    counts
}

/// Builds the frequency profile of `text`. Non-letters are ignored.
///
/// All frequencies are zero when the text contains no letters.
pub fn profile(text: &str) -> FrequencyProfile {
    let counts = count_letters(text);
    let total: u32 = counts.iter().sum();
    let mut frequencies = [0.0; 26];

    if total > 0 {
        for (freq, &count) in frequencies.iter_mut().zip(counts.iter()) {
            *freq = 100.0 * count as f64 / total as f64;
        }
    }

    FrequencyProfile {
        counts,
        frequencies,
        total,
    }
}

/// Calculates the Index of Coincidence (IC) for the given text.
///
/// # Returns
///
/// The Index of Coincidence value (0.0 if text has < 2 letters).
pub fn index_of_coincidence(text: &str) -> f64 {
    let counts = count_letters(text);
    let total: u64 = counts.iter().map(|&c| c as u64).sum();

    if total < 2 {
        return 0.0;
    }

    let numerator: u64 = counts
        .iter()
        .map(|&c| c as u64 * (c as u64).saturating_sub(1))
        .sum();
    numerator as f64 / (total * (total - 1)) as f64
}

/// The `k` most frequent letters of `text` (uppercase), by descending count.
///
/// Letters with equal counts keep the order in which they were first seen
/// while scanning the text. Letters that never occur are not returned.
pub fn top_letters(text: &str, k: usize) -> Vec<char> {
    let mut counts = [0u32; 26];
    let mut first_seen: Vec<usize> = Vec::with_capacity(26);

    for symbol in text.chars().filter_map(Symbol::parse) {
        let idx = symbol.index as usize;
        if counts[idx] == 0 {
            first_seen.push(idx);
        }
        counts[idx] += 1;
    }

    // Stable sort keeps first-seen order among ties.
    first_seen.sort_by(|&x, &y| counts[y].cmp(&counts[x]));
    first_seen
        .into_iter()
        .take(k)
        .map(|idx| (b'A' + idx as u8) as char)
        .collect()
}

fn letter_index(letter: char) -> Option<usize> {
    Symbol::parse(letter).map(|s| s.index as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts_and_percentages() {
        let p = profile("Hello, hello!");
        assert_eq!(p.total, 10);
        assert_eq!(p.count('l'), 4);
        assert_eq!(p.count('H'), 2);
        assert!((p.frequency('L') - 40.0).abs() < 1e-9);
        let sum: f64 = p.frequencies.iter().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_profile_empty_text() {
        let p = profile("123 ...");
        assert_eq!(p.total, 0);
        assert!(p.frequencies.iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_ic_repeated_letter() {
        assert_eq!(index_of_coincidence("aa"), 1.0);
        assert_eq!(index_of_coincidence("ZZZZ zzzz"), 1.0);
    }

    #[test]
    fn test_ic_degenerate_samples() {
        assert_eq!(index_of_coincidence(""), 0.0);
        assert_eq!(index_of_coincidence("q"), 0.0);
        assert_eq!(index_of_coincidence("q !!"), 0.0);
    }

    #[test]
    fn test_ic_calculation() {
        let uniform_text = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
        assert_eq!(index_of_coincidence(uniform_text), 0.0);
        // AABB: (2 + 2) / (4 * 3)
        assert!((index_of_coincidence("AABB") - 4.0 / 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_top_letters_order() {
        assert_eq!(top_letters("aaabbc", 6), vec!['A', 'B', 'C']);
        assert_eq!(top_letters("aaabbc", 2), vec!['A', 'B']);
    }

    #[test]
    fn test_top_letters_ties_keep_first_seen() {
        // All counts equal: scan order decides.
        assert_eq!(top_letters("zyx", 3), vec!['Z', 'Y', 'X']);
        // Q and B tie at 2, Q was seen first.
        assert_eq!(top_letters("qbBqEEE", 3), vec!['E', 'Q', 'B']);
    }

    #[test]
    fn test_comparison_sorted_by_frequency() {
        let rows = profile("eeet").comparison();
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[0].letter, 'E');
        assert_eq!(rows[1].letter, 'T');
        assert_eq!(rows[2].letter, 'A');
        assert!((rows[0].difference - (75.0 - 12.70)).abs() < 1e-9);
    }

    #[test]
    fn test_english_table_sums_to_about_100() {
        let sum: f64 = ENGLISH_FREQUENCIES.iter().sum();
        assert!((sum - 100.0).abs() < 0.5);
    }
}
