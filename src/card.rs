//! Card domain types and text helpers shared by every stage.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static ORDINAL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s*").unwrap());

/// The two card categories of the game.
///
/// Every stage partitions on this tag; raw inputs carry it as the literal
/// labels `"Prompt"` / `"Response"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    Prompt,
    Response,
}

impl CardKind {
    /// Both kinds, in canonical output order (prompts first).
    pub const ALL: [CardKind; 2] = [CardKind::Prompt, CardKind::Response];

    /// The label used in spreadsheet exports and the canonical CSV.
    pub fn label(&self) -> &'static str {
        match self {
            CardKind::Prompt => "Prompt",
            CardKind::Response => "Response",
        }
    }

    /// Plural form for directory names and reporting.
    pub fn plural(&self) -> &'static str {
        match self {
            CardKind::Prompt => "prompts",
            CardKind::Response => "responses",
        }
    }

    /// Glob pattern matching this kind's batch text files.
    pub fn batch_pattern(&self) -> &'static str {
        match self {
            CardKind::Prompt => "prompts_batch*.txt",
            CardKind::Response => "responses_batch*.txt",
        }
    }

    /// Parse a raw type cell. Leading/trailing whitespace is ignored;
    /// anything other than the two known labels is `None`.
    pub fn from_label(s: &str) -> Option<CardKind> {
        match s.trim() {
            "Prompt" => Some(CardKind::Prompt),
            "Response" => Some(CardKind::Response),
            _ => None,
        }
    }
}

impl fmt::Display for CardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single card: a category tag plus its text.
///
/// The serde renames match the canonical CSV header `(Type, CardText)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "Type")]
    pub kind: CardKind,
    #[serde(rename = "CardText")]
    pub text: String,
}

/// Strip a single leading `"N. "` ordinal prefix from a batch-file line.
pub fn strip_ordinal(line: &str) -> &str {
    match ORDINAL_PREFIX.find(line) {
        Some(m) => &line[m.end()..],
        None => line,
    }
}

/// Flatten embedded newlines to single spaces.
///
/// Applied only when cards are written one-per-line; dedup keys keep the
/// original newlines.
pub fn flatten_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
