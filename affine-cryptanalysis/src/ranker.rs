//! Candidate ranking and key selection

use log::debug;
use serde::{Deserialize, Serialize};

use crate::affine::{decrypt_text, AffineKey};
use crate::error::{AffineError, Result};
use crate::hypothesis::{Hypothesis, Provenance};
use crate::scoring::{PlaintextScorer, PlausibilityScore};

/// Default length of the ranked candidate list.
pub const DEFAULT_TOP_N: usize = 5;

/// A decrypted and scored hypothesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub key: AffineKey,
    pub plaintext: String,
    pub score: PlausibilityScore,
    pub provenance: Provenance,
}

impl Candidate {
    /// First `max_chars` characters of the plaintext.
    pub fn preview(&self, max_chars: usize) -> String {
        self.plaintext.chars().take(max_chars).collect()
    }
}

/// Outcome of ranking all hypotheses of one ciphertext.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Ranking {
    pub best: Option<Candidate>,
    /// Candidates with a positive score, best first, at most `top_n`.
    pub ranked: Vec<Candidate>,
}

impl Ranking {
    /// The best candidate, or `NoHypothesisFound`.
    pub fn into_best(self) -> Result<Candidate> {
        self.best.ok_or(AffineError::NoHypothesisFound)
    }
}

/// Decrypts `ciphertext` under every hypothesis and keeps the best ones.
///
/// The best candidate is the first one reaching the maximum score, so the
/// result only depends on the hypothesis order. A hypothesis whose key cannot
/// decrypt is skipped.
pub fn rank<S: PlaintextScorer>(
    scorer: &S,
    ciphertext: &str,
    hypotheses: &[Hypothesis],
    top_n: usize,
) -> Ranking {
    let mut best: Option<Candidate> = None;
    let mut best_score: u32 = 0;
    let mut ranked: Vec<Candidate> = Vec::new();

    for hypothesis in hypotheses {
        let plaintext = match decrypt_text(ciphertext, hypothesis.key) {
            Ok(text) => text,
            Err(e) => {
                debug!("skipping {}: {}", hypothesis.key, e);
                continue;
            }
        };

        let score = scorer.score(&plaintext);
        if score.total == 0 {
            continue;
        }

        let candidate = Candidate {
            key: hypothesis.key,
            plaintext,
            score,
            provenance: hypothesis.provenance,
        };

        if score.total > best_score {
            best_score = score.total;
            best = Some(candidate.clone());
        }
        ranked.push(candidate);
    }

    // Stable: equal scores stay in generation order.
    ranked.sort_by(|x, y| y.score.total.cmp(&x.score.total));
    ranked.truncate(top_n);

    Ranking { best, ranked }
}
