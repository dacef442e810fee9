//! Scored-card loading and weighted scoring.
//!
//! Score batches arrive as JSON arrays produced by an external rating pass;
//! each record carries the card, its category, and six quality dimensions.
//! Loading is lenient per record (warn and skip) but strict about the scores
//! directory existing at all.

pub mod selector;
pub mod stats;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::card::CardKind;
use crate::error::{DeckError, Result};

/// Dimension names in rubric order.
pub const DIMENSIONS: [&str; 6] = [
    "humor",
    "appropriateness",
    "versatility",
    "cultural_relevance",
    "specificity",
    "originality",
];

/// Per-card quality ratings from the external scoring pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub humor: f64,
    pub appropriateness: f64,
    pub versatility: f64,
    pub cultural_relevance: f64,
    pub specificity: f64,
    pub originality: f64,
}

impl Dimensions {
    /// Look up a dimension by its rubric name.
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            "humor" => Some(self.humor),
            "appropriateness" => Some(self.appropriateness),
            "versatility" => Some(self.versatility),
            "cultural_relevance" => Some(self.cultural_relevance),
            "specificity" => Some(self.specificity),
            "originality" => Some(self.originality),
            _ => None,
        }
    }
}

/// Rubric weights for the composite score. The defaults sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub humor: f64,
    pub appropriateness: f64,
    pub versatility: f64,
    pub cultural_relevance: f64,
    pub specificity: f64,
    pub originality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            humor: 0.30,
            appropriateness: 0.20,
            versatility: 0.20,
            cultural_relevance: 0.15,
            specificity: 0.10,
            originality: 0.05,
        }
    }
}

/// A card together with its ratings and derived composite score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCard {
    pub kind: CardKind,
    pub text: String,
    pub dimensions: Dimensions,
    pub weighted_score: f64,
}

/// Weighted composite of the six dimension scores.
///
/// Pure and order-independent: identical inputs always produce the same
/// float.
pub fn weighted_score(dims: &Dimensions, weights: &ScoreWeights) -> f64 {
    dims.humor * weights.humor
        + dims.appropriateness * weights.appropriateness
        + dims.versatility * weights.versatility
        + dims.cultural_relevance * weights.cultural_relevance
        + dims.specificity * weights.specificity
        + dims.originality * weights.originality
}

/// Load every scored card from `batch_*.json` files under `scores_dir`,
/// in sorted file order.
///
/// A missing directory or zero batch files is fatal. A file whose top level
/// is not an array is skipped with a warning, as is any record missing
/// required fields.
pub fn load_scores(scores_dir: &Path, weights: &ScoreWeights) -> Result<Vec<ScoredCard>> {
    if !scores_dir.is_dir() {
        return Err(DeckError::MissingInput(format!(
            "scores directory {}",
            scores_dir.display()
        )));
    }

    let pattern = scores_dir.join("batch_*.json");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())?
        .collect::<std::result::Result<_, _>>()?;
    files.sort();
    if files.is_empty() {
        return Err(DeckError::MissingInput(format!(
            "no batch_*.json files in {}",
            scores_dir.display()
        )));
    }

    let mut cards = Vec::new();
    for file in &files {
        tracing::debug!("loading {}", file.display());
        let data: Value = serde_json::from_str(&std::fs::read_to_string(file)?)?;
        let Some(entries) = data.as_array() else {
            tracing::warn!("{} is not a JSON array, skipping", file.display());
            continue;
        };
        for entry in entries {
            match parse_record(entry, weights) {
                Ok(card) => cards.push(card),
                Err(reason) => {
                    tracing::warn!("skipping record in {}: {}", file.display(), reason)
                }
            }
        }
    }

    Ok(cards)
}

fn parse_record(entry: &Value, weights: &ScoreWeights) -> std::result::Result<ScoredCard, String> {
    let obj = entry.as_object().ok_or("entry is not an object")?;

    let missing: Vec<&str> = DIMENSIONS
        .into_iter()
        .filter(|dim| !obj.get(*dim).map(Value::is_number).unwrap_or(false))
        .collect();
    if !missing.is_empty() {
        let text = obj.get("card_text").and_then(Value::as_str).unwrap_or("?");
        return Err(format!(
            "missing dimensions {:?} for {:?}",
            missing,
            clip(text, 50)
        ));
    }

    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .and_then(CardKind::from_label)
        .ok_or("missing or invalid type")?;
    let text = obj
        .get("card_text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("missing card_text")?
        .to_string();

    let dimensions = Dimensions {
        humor: number(obj, "humor"),
        appropriateness: number(obj, "appropriateness"),
        versatility: number(obj, "versatility"),
        cultural_relevance: number(obj, "cultural_relevance"),
        specificity: number(obj, "specificity"),
        originality: number(obj, "originality"),
    };

    Ok(ScoredCard {
        kind,
        text,
        weighted_score: weighted_score(&dimensions, weights),
        dimensions,
    })
}

fn number(obj: &serde_json::Map<String, Value>, key: &str) -> f64 {
    obj.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// First `limit` characters, for log lines.
pub(crate) fn clip(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(limit).collect();
        clipped.push_str("...");
        clipped
    }
}
