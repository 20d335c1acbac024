//! Per-record analysis: strategy selection, batch processing and summaries

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::affine::{decrypt_text, AffineKey};
use crate::error::AffineError;
use crate::formula::{derive_key, matches_formula};
use crate::hypothesis::GeneratorConfig;
use crate::ranker::{rank, Candidate, DEFAULT_TOP_N};
use crate::scoring::{PlaintextScorer, ScoringConfig};

/// One analysis unit: a ciphertext, its optional tag, and any further
/// encrypted fields that share its key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub ciphertext: String,
    #[serde(default, alias = "tag")]
    pub mood: Option<i64>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    pub fn new(ciphertext: impl Into<String>, mood: Option<i64>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            mood,
            fields: BTreeMap::new(),
        }
    }
}

/// How a key is obtained for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Formula when the tag allows it, frequency search otherwise.
    #[default]
    Auto,
    Formula,
    Search,
}

/// Which path actually produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    Formula,
    Search,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Formula => write!(f, "formula"),
            Method::Search => write!(f, "search"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Recovered,
    NoKeyFound,
    Skipped(String),
}

/// Everything known about one record after analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub index: usize,
    pub mood: Option<i64>,
    pub method: Option<Method>,
    pub outcome: Outcome,
    pub key: Option<AffineKey>,
    pub plaintext: Option<String>,
    pub score: u32,
    pub ioc: f64,
    /// Best search candidates, best first. Empty on the formula path.
    pub candidates: Vec<Candidate>,
    /// Auxiliary fields decrypted with the selected key.
    pub fields: BTreeMap<String, String>,
    /// Whether a search-recovered key agrees with the tag formula.
    pub formula_agrees: Option<bool>,
}

impl AnalysisResult {
    fn empty(index: usize, mood: Option<i64>, outcome: Outcome) -> Self {
        Self {
            index,
            mood,
            method: None,
            outcome,
            key: None,
            plaintext: None,
            score: 0,
            ioc: 0.0,
            candidates: Vec::new(),
            fields: BTreeMap::new(),
            formula_agrees: None,
        }
    }

    pub fn is_recovered(&self) -> bool {
        self.outcome == Outcome::Recovered
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub strategy: Strategy,
    pub scoring: ScoringConfig,
    pub generator: GeneratorConfig,
    pub top_n: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            scoring: ScoringConfig::default(),
            generator: GeneratorConfig::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// Runs key recovery over records. Holds only read-only configuration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: EngineConfig,
}

impl Analyzer {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyses a single record. Never fails: problems become the outcome.
    pub fn analyze(&self, index: usize, record: &Record) -> AnalysisResult {
        let result = match (self.config.strategy, record.mood) {
            (Strategy::Search, _) => self.search(index, record),
            (Strategy::Formula, None) => AnalysisResult::empty(
                index,
                None,
                Outcome::Skipped("no mood/tag available for the formula".to_string()),
            ),
            (Strategy::Formula, Some(tag)) => match self.formula(index, record, tag) {
                Ok(result) => result,
                Err(e) => AnalysisResult::empty(index, Some(tag), Outcome::Skipped(e.to_string())),
            },
            (Strategy::Auto, None) => self.search(index, record),
            (Strategy::Auto, Some(tag)) => match self.formula(index, record, tag) {
                Ok(result) => result,
                Err(e) => {
                    warn!("record {}: {}, falling back to search", index, e);
                    self.search(index, record)
                }
            },
        };

        match (&result.outcome, result.key) {
            (Outcome::Recovered, Some(key)) => info!(
                "record {}: {} via {} (score {}, IoC {:.4})",
                index,
                key,
                result.method.map_or("-".to_string(), |m| m.to_string()),
                result.score,
                result.ioc
            ),
            (outcome, _) => info!("record {}: {:?}", index, outcome),
        }
        result
    }

    /// Analyses every record, in parallel, keeping input order.
    pub fn analyze_batch(&self, records: &[Record]) -> Vec<AnalysisResult> {
        records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.analyze(index, record))
            .collect()
    }

    fn formula(
        &self,
        index: usize,
        record: &Record,
        tag: i64,
    ) -> Result<AnalysisResult, AffineError> {
        let key = derive_key(tag)?;
        let plaintext = decrypt_text(&record.ciphertext, key)?;
        let score = self.config.scoring.score(&plaintext);
        debug!("record {}: formula key {} for tag {}", index, key, tag);

        Ok(AnalysisResult {
            method: Some(Method::Formula),
            key: Some(key),
            plaintext: Some(plaintext),
            score: score.total,
            ioc: score.ioc,
            fields: decrypt_fields(&record.fields, key),
            formula_agrees: Some(true),
            ..AnalysisResult::empty(index, Some(tag), Outcome::Recovered)
        })
    }

    fn search(&self, index: usize, record: &Record) -> AnalysisResult {
        let hypotheses = self.config.generator.generate(&record.ciphertext);
        debug!("record {}: {} hypotheses", index, hypotheses.len());

        let ranking = rank(
            &self.config.scoring,
            &record.ciphertext,
            &hypotheses,
            self.config.top_n,
        );

        let best = match ranking.best {
            Some(best) => best,
            None => {
                return AnalysisResult {
                    method: Some(Method::Search),
                    ..AnalysisResult::empty(index, record.mood, Outcome::NoKeyFound)
                }
            }
        };

        AnalysisResult {
            method: Some(Method::Search),
            key: Some(best.key),
            score: best.score.total,
            ioc: best.score.ioc,
            fields: decrypt_fields(&record.fields, best.key),
            formula_agrees: record.mood.map(|tag| matches_formula(tag, best.key)),
            plaintext: Some(best.plaintext),
            candidates: ranking.ranked,
            ..AnalysisResult::empty(index, record.mood, Outcome::Recovered)
        }
    }
}

// Fields that fail to decrypt are left out; the key was already validated.
fn decrypt_fields(fields: &BTreeMap<String, String>, key: AffineKey) -> BTreeMap<String, String> {
    fields
        .iter()
        .filter_map(|(name, value)| {
            decrypt_text(value, key)
                .ok()
                .map(|plain| (name.clone(), plain))
        })
        .collect()
}

/// Aggregate counts over a batch of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub recovered: usize,
    pub no_key: usize,
    pub skipped: usize,
    pub via_formula: usize,
    pub via_search: usize,
    /// Search results whose key matches the tag formula.
    pub formula_confirmed: usize,
    /// Search results whose key contradicts the tag formula.
    pub formula_contradicted: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[AnalysisResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };

        for result in results {
            match result.outcome {
                Outcome::Recovered => summary.recovered += 1,
                Outcome::NoKeyFound => summary.no_key += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
            }
            if !result.is_recovered() {
                continue;
            }
            match result.method {
                Some(Method::Formula) => summary.via_formula += 1,
                Some(Method::Search) => {
                    summary.via_search += 1;
                    match result.formula_agrees {
                        Some(true) => summary.formula_confirmed += 1,
                        Some(false) => summary.formula_contradicted += 1,
                        None => {}
                    }
                }
                None => {}
            }
        }

        summary
    }

    /// `true` when every search result with a tag agreed with the formula.
    pub fn formula_verified(&self) -> bool {
        self.formula_contradicted == 0 && self.formula_confirmed > 0
    }
}
