//! English plausibility scoring of candidate plaintexts

use serde::{Deserialize, Serialize};

use crate::frequency::index_of_coincidence;

/// Common English words, matched as substrings anywhere in the candidate.
pub const COMMON_WORDS: [&str; 36] = [
    "THE", "AND", "TO", "OF", "A", "IN", "IS", "YOU", "THAT", "IT", "FOR", "WITH", "AS",
    "THIS", "ARE", "ON", "BE", "AT", "BY", "YOUR", "HAVE", "NOT", "BUT", "CAN", "FROM",
    "THEY", "WE", "FEEL", "FEELING", "HELLO", "WELCOME", "GREAT", "WONDERFUL", "ITS",
    "LISTEN", "SUPPORT",
];

pub const COMMON_BIGRAMS: [&str; 12] = [
    "TH", "HE", "IN", "ER", "AN", "RE", "ON", "AT", "EN", "ND", "ST", "ES",
];

pub const COMMON_TRIGRAMS: [&str; 10] = [
    "THE", "AND", "ING", "HER", "ERE", "ENT", "THA", "NTH", "FOR", "YOU",
];

/// Word list of the plain word-count scorer.
pub const WORD_COUNT_WORDS: [&str; 25] = [
    "THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "WITH", "HER", "WAS", "ONE", "OUR",
    "OUT", "CAN", "WHO", "THAT", "THIS", "HAVE", "FROM", "THEY", "BEEN", "YOUR", "FEEL",
    "FEELING", "KNOW",
];

/// IoC band of natural English text, inclusive on both ends.
pub const ENGLISH_IOC_BAND: (f64, f64) = (0.060, 0.075);

/// Anything that can rate how English-like a candidate plaintext is.
pub trait PlaintextScorer {
    fn score(&self, plaintext: &str) -> PlausibilityScore;
}

/// Score of one candidate plaintext with its breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlausibilityScore {
    pub total: u32,
    pub words: u32,
    pub bigrams: u32,
    pub trigrams: u32,
    pub ioc_bonus: u32,
    pub ioc: f64,
}

/// Reference lists and weights of the heuristic scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub words: Vec<String>,
    pub word_weight: u32,
    pub bigrams: Vec<String>,
    pub bigram_weight: u32,
    pub trigrams: Vec<String>,
    pub trigram_weight: u32,
    pub ioc_band: (f64, f64),
    pub ioc_bonus: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            words: to_owned(&COMMON_WORDS),
            word_weight: 5,
            bigrams: to_owned(&COMMON_BIGRAMS),
            bigram_weight: 2,
            trigrams: to_owned(&COMMON_TRIGRAMS),
            trigram_weight: 3,
            ioc_band: ENGLISH_IOC_BAND,
            ioc_bonus: 100,
        }
    }
}

impl ScoringConfig {
    /// One point per distinct word found, nothing else.
    pub fn word_count() -> Self {
        Self {
            words: to_owned(&WORD_COUNT_WORDS),
            word_weight: 1,
            bigrams: Vec::new(),
            bigram_weight: 0,
            trigrams: Vec::new(),
            trigram_weight: 0,
            ioc_band: ENGLISH_IOC_BAND,
            ioc_bonus: 0,
        }
    }
}

impl PlaintextScorer for ScoringConfig {
    fn score(&self, plaintext: &str) -> PlausibilityScore {
        let upper = plaintext.to_uppercase();

        let words = hits(&upper, &self.words) * self.word_weight;
        let bigrams = hits(&upper, &self.bigrams) * self.bigram_weight;
        let trigrams = hits(&upper, &self.trigrams) * self.trigram_weight;

        let ioc = index_of_coincidence(plaintext);
        let (low, high) = self.ioc_band;
        let ioc_bonus = if (low..=high).contains(&ioc) {
            self.ioc_bonus
        } else {
            0
        };

        PlausibilityScore {
            total: words + bigrams + trigrams + ioc_bonus,
            words,
            bigrams,
            trigrams,
            ioc_bonus,
            ioc,
        }
    }
}

/// Scores `plaintext` with the default configuration.
pub fn score_english(plaintext: &str) -> PlausibilityScore {
    ScoringConfig::default().score(plaintext)
}

// Number of distinct patterns contained in `haystack`.
fn hits(haystack: &str, patterns: &[String]) -> u32 {
    patterns
        .iter()
        .filter(|p| haystack.contains(p.as_str()))
        .count() as u32
}

fn to_owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_scores_zero() {
        let s = score_english("");
        assert_eq!(s.total, 0);
        assert_eq!(s.ioc, 0.0);
    }

    #[test]
    fn test_breakdown_for_the() {
        let s = score_english("the");
        assert_eq!(s.words, 5); // THE
        assert_eq!(s.bigrams, 4); // TH, HE
        assert_eq!(s.trigrams, 3); // THE
        assert_eq!(s.ioc_bonus, 0);
        assert_eq!(s.total, 12);
    }

    #[test]
    fn test_substring_matching_is_permissive() {
        // "CANDY" contains CAN, AND, A, AN, ND as substrings.
        let s = score_english("candy");
        assert_eq!(s.words, 3 * 5); // CAN, AND, A
        assert_eq!(s.bigrams, 2 * 2); // AN, ND
        assert_eq!(s.trigrams, 3); // AND
    }

    #[test]
    fn test_each_word_counted_once() {
        let once = score_english("the");
        let many = score_english("the the the");
        assert_eq!(once.words, many.words);
        assert_eq!(once.trigrams, many.trigrams);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(score_english("Hello").total, score_english("HELLO").total);
    }

    #[test]
    fn test_ioc_bonus_band_inclusive() {
        let config = ScoringConfig {
            ioc_band: (1.0, 1.0),
            ..ScoringConfig::default()
        };
        // IoC of "zz" is exactly 1.0.
        assert_eq!(config.score("zz").ioc_bonus, 100);
        assert_eq!(config.score("zy").ioc_bonus, 0);
    }

    #[test]
    fn test_english_text_gets_ioc_bonus() {
        let text = "It is a wonderful thing to feel that someone will listen to you \
                    and support you when the days are long and the nights are longer";
        let s = score_english(text);
        assert!(s.ioc >= 0.060 && s.ioc <= 0.075, "ioc = {}", s.ioc);
        assert_eq!(s.ioc_bonus, 100);
        assert!(s.total > 150);
    }

    #[test]
    fn test_word_count_preset() {
        let scorer = ScoringConfig::word_count();
        let s = scorer.score("you know that feeling");
        // YOU, KNOW, THAT, FEEL, FEELING
        assert_eq!(s.total, 5);
        assert_eq!(s.bigrams + s.trigrams + s.ioc_bonus, 0);
    }
}
