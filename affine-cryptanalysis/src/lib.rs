//! # Affine Cryptanalysis Library
//!
//! Recovers the key `(a, b)` of an affine substitution cipher
//! (`C = a * P + b mod 26`) from ciphertext alone and decrypts it.
//!
//! ## Pipeline
//!
//! - **Frequency profiling** - letter counts, percentages and Index of Coincidence
//! - **Hypothesis generation** - frequent ciphertext letters paired with E, T, A
//! - **Ranking** - every hypothesis is decrypted and scored for English plausibility
//! - **Formula shortcut** - `a = 2t + 1`, `b = 2t` when a per-message tag is known
//!
//! ## Usage
//!
//! ```rust
//! use affine_cryptanalysis::{encrypt_text, Analyzer, AffineKey, Record};
//!
//! let key = AffineKey::new(7, 6);
//! let plain = "It is great that you are here and we are here to listen to you.";
//! let cipher = encrypt_text(plain, key)?;
//!
//! let result = Analyzer::default().analyze(0, &Record::new(cipher, None));
//! assert_eq!(result.key, Some(key));
//! assert_eq!(result.plaintext.as_deref(), Some(plain));
//! # Ok::<(), affine_cryptanalysis::AffineError>(())
//! ```

pub mod affine;
pub mod engine;
pub mod error;
pub mod formula;
pub mod frequency;
pub mod hypothesis;
pub mod modular;
pub mod ranker;
pub mod scoring;

pub use affine::{decrypt_symbol, decrypt_text, encrypt_symbol, encrypt_text, AffineKey, Symbol};
pub use engine::{
    AnalysisResult, Analyzer, BatchSummary, EngineConfig, Method, Outcome, Record, Strategy,
};
pub use error::{AffineError, Result};
pub use formula::{derive_key, matches_formula, universal_decrypt};
pub use frequency::{index_of_coincidence, profile, top_letters, ComparisonRow, FrequencyProfile};
pub use hypothesis::{generate_hypotheses, GeneratorConfig, Hypothesis, Provenance};
pub use modular::{mod_inverse, VALID_A};
pub use ranker::{rank, Candidate, Ranking};
pub use scoring::{score_english, PlaintextScorer, PlausibilityScore, ScoringConfig};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
