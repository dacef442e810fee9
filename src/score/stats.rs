//! Score distribution diagnostics.
//!
//! Reporting aids only; nothing downstream consumes these numbers.

use std::cmp::Ordering;

use super::{ScoredCard, DIMENSIONS};

/// Five-point summary of a category's score distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distribution {
    pub max: f64,
    pub upper_quartile: f64,
    pub median: f64,
    pub lower_quartile: f64,
    pub min: f64,
}

/// Quartile summary over a set of scored cards. `None` for empty input.
pub fn distribution(cards: &[ScoredCard]) -> Option<Distribution> {
    if cards.is_empty() {
        return None;
    }
    let mut scores: Vec<f64> = cards.iter().map(|c| c.weighted_score).collect();
    scores.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));

    let n = scores.len();
    Some(Distribution {
        max: scores[0],
        upper_quartile: scores[n / 4],
        median: scores[n / 2],
        lower_quartile: scores[3 * n / 4],
        min: scores[n - 1],
    })
}

/// Mean of each dimension over the given cards, in rubric order.
/// `None` for empty input.
pub fn dimension_averages(cards: &[ScoredCard]) -> Option<Vec<(&'static str, f64)>> {
    if cards.is_empty() {
        return None;
    }
    let n = cards.len() as f64;
    Some(
        DIMENSIONS
            .iter()
            .map(|&dim| {
                let sum: f64 = cards
                    .iter()
                    .map(|c| c.dimensions.get(dim).unwrap_or(0.0))
                    .sum();
                (dim, sum / n)
            })
            .collect(),
    )
}
