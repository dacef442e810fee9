//! Top-N selection over scored cards.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::card::CardKind;

use super::ScoredCard;

/// Final deck size per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetCounts {
    pub prompts: usize,
    pub responses: usize,
}

impl Default for TargetCounts {
    fn default() -> Self {
        Self {
            prompts: 102,
            responses: 510,
        }
    }
}

impl TargetCounts {
    pub fn total(&self) -> usize {
        self.prompts + self.responses
    }

    pub fn for_kind(&self, kind: CardKind) -> usize {
        match kind {
            CardKind::Prompt => self.prompts,
            CardKind::Response => self.responses,
        }
    }
}

/// One category after ranking: the kept cards followed by everything that
/// missed the cut, both in descending score order.
#[derive(Debug, Clone, Default)]
pub struct RankedPartition {
    pub kept: Vec<ScoredCard>,
    pub cut: Vec<ScoredCard>,
}

impl RankedPartition {
    /// Total records scored in this category.
    pub fn scored(&self) -> usize {
        self.kept.len() + self.cut.len()
    }

    /// The lowest-ranked kept card, i.e. the cutoff.
    pub fn cutoff(&self) -> Option<&ScoredCard> {
        self.kept.last()
    }
}

/// Both categories after ranking and truncation.
#[derive(Debug, Clone, Default)]
pub struct DeckSelection {
    pub prompts: RankedPartition,
    pub responses: RankedPartition,
}

impl DeckSelection {
    pub fn partition(&self, kind: CardKind) -> &RankedPartition {
        match kind {
            CardKind::Prompt => &self.prompts,
            CardKind::Response => &self.responses,
        }
    }

    pub fn kept_total(&self) -> usize {
        self.prompts.kept.len() + self.responses.kept.len()
    }

    /// Kept cards in output order: prompts by rank, then responses by rank.
    pub fn kept_cards(&self) -> impl Iterator<Item = &ScoredCard> {
        self.prompts.kept.iter().chain(self.responses.kept.iter())
    }
}

/// Partition by kind, rank by weighted score descending, truncate to the
/// targets.
///
/// The sort is stable, so equal scores keep their load order. A category
/// with fewer cards than its target is taken whole; selection never fails
/// on short input.
pub fn select_top(cards: Vec<ScoredCard>, targets: &TargetCounts) -> DeckSelection {
    let mut prompts = Vec::new();
    let mut responses = Vec::new();
    for card in cards {
        match card.kind {
            CardKind::Prompt => prompts.push(card),
            CardKind::Response => responses.push(card),
        }
    }
    DeckSelection {
        prompts: rank(prompts, targets.prompts),
        responses: rank(responses, targets.responses),
    }
}

fn rank(mut cards: Vec<ScoredCard>, target: usize) -> RankedPartition {
    cards.sort_by(|a, b| {
        b.weighted_score
            .partial_cmp(&a.weighted_score)
            .unwrap_or(Ordering::Equal)
    });
    let cut = cards.split_off(target.min(cards.len()));
    RankedPartition { kept: cards, cut }
}
