//! Dual-section spreadsheet extraction.
//!
//! The raw export lays two independent `(type, text)` column pairs side by
//! side on every row. Both pairs are inspected independently; valid cards
//! land in per-category ordered sets keyed on the trimmed text.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::card::{flatten_newlines, CardKind};
use crate::error::{DeckError, Result};

/// Extraction stage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// `(type, text)` column offsets of each independent section
    #[serde(default = "default_sections")]
    pub sections: Vec<(usize, usize)>,

    /// File name for the numbered prompt list
    #[serde(default = "default_prompts_out")]
    pub prompts_out: PathBuf,

    /// File name for the numbered response list
    #[serde(default = "default_responses_out")]
    pub responses_out: PathBuf,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            prompts_out: default_prompts_out(),
            responses_out: default_responses_out(),
        }
    }
}

fn default_sections() -> Vec<(usize, usize)> {
    vec![(0, 1), (11, 12)]
}

fn default_prompts_out() -> PathBuf {
    PathBuf::from("extracted_prompts.txt")
}

fn default_responses_out() -> PathBuf {
    PathBuf::from("extracted_responses.txt")
}

/// Deduplicated card texts per category, in lexicographic order.
///
/// Keys keep any embedded newlines intact; flattening happens only when the
/// numbered lists are written.
#[derive(Debug, Default)]
pub struct CardSets {
    pub prompts: BTreeSet<String>,
    pub responses: BTreeSet<String>,
}

impl CardSets {
    pub fn insert(&mut self, kind: CardKind, text: String) {
        match kind {
            CardKind::Prompt => self.prompts.insert(text),
            CardKind::Response => self.responses.insert(text),
        };
    }

    pub fn get(&self, kind: CardKind) -> &BTreeSet<String> {
        match kind {
            CardKind::Prompt => &self.prompts,
            CardKind::Response => &self.responses,
        }
    }

    pub fn total(&self) -> usize {
        self.prompts.len() + self.responses.len()
    }
}

/// Scan the export and collect unique cards from every configured section.
///
/// Rows too short to hold a section's columns contribute nothing for that
/// section; empty text cells are skipped.
pub fn extract_cards(input: &Path, config: &ExtractConfig) -> Result<CardSets> {
    if !input.is_file() {
        return Err(DeckError::MissingInput(format!("export file {}", input.display())));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)?;

    let mut sets = CardSets::default();
    for record in reader.records() {
        let record = record?;
        for &(kind_col, text_col) in &config.sections {
            let Some(kind) = record.get(kind_col).and_then(CardKind::from_label) else {
                continue;
            };
            let Some(text) = record.get(text_col).map(str::trim).filter(|t| !t.is_empty())
            else {
                continue;
            };
            sets.insert(kind, text.to_string());
        }
    }

    Ok(sets)
}

/// Write one category as a numbered list, one card per line.
pub fn write_numbered_list<'a, I>(cards: I, path: &Path) -> Result<()>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut out = BufWriter::new(File::create(path)?);
    for (i, card) in cards.into_iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, flatten_newlines(card))?;
    }
    out.flush()?;
    Ok(())
}
