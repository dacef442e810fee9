//! The canonical deck: ordered prompt and response lists plus their
//! on-disk representations.

use std::fs;
use std::path::Path;

use crate::card::{Card, CardKind};
use crate::error::{DeckError, Result};

/// Ordered card texts per category. Prompts always precede responses in
/// every serialized form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub prompts: Vec<String>,
    pub responses: Vec<String>,
}

impl Deck {
    pub fn new(prompts: Vec<String>, responses: Vec<String>) -> Self {
        Self { prompts, responses }
    }

    pub fn total(&self) -> usize {
        self.prompts.len() + self.responses.len()
    }

    pub fn by_kind(&self, kind: CardKind) -> &[String] {
        match kind {
            CardKind::Prompt => &self.prompts,
            CardKind::Response => &self.responses,
        }
    }

    /// Write the canonical `(Type, CardText)` CSV.
    ///
    /// Output is deterministic: the same deck always produces byte-identical
    /// files.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(["Type", "CardText"])?;
        for kind in CardKind::ALL {
            for text in self.by_kind(kind) {
                writer.write_record([kind.label(), text.as_str()])?;
            }
        }
        writer.flush()?;
        Ok(())
    }

    /// Read a canonical CSV back into a deck. A missing file is fatal.
    pub fn read_csv(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(DeckError::MissingInput(format!("deck CSV {}", path.display())));
        }
        let mut reader = csv::Reader::from_path(path)?;
        let mut deck = Deck::default();
        for row in reader.deserialize::<Card>() {
            let card = row?;
            match card.kind {
                CardKind::Prompt => deck.prompts.push(card.text),
                CardKind::Response => deck.responses.push(card.text),
            }
        }
        Ok(deck)
    }

    /// Write the text files consumed by the external sheet renderer:
    /// `info.txt` with the game name, `black.txt` with prompts, and
    /// `white.txt` with responses.
    pub fn write_renderer_export(&self, dir: &Path, game_name: &str) -> Result<()> {
        fs::create_dir_all(dir)?;
        fs::write(dir.join("info.txt"), format!("{}\nv1.0\n", game_name))?;
        fs::write(dir.join("black.txt"), join_lines(&self.prompts))?;
        fs::write(dir.join("white.txt"), join_lines(&self.responses))?;
        Ok(())
    }
}

fn join_lines(cards: &[String]) -> String {
    let mut out = cards.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_deck() -> Deck {
        Deck::new(
            vec!["What is _?".to_string(), "Why, oh why, _?".to_string()],
            vec!["A sensible answer".to_string()],
        )
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.csv");
        let deck = sample_deck();
        deck.write_csv(&path).unwrap();
        assert_eq!(Deck::read_csv(&path).unwrap(), deck);
    }

    #[test]
    fn test_csv_quotes_commas_and_newlines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.csv");
        let deck = Deck::new(
            vec!["First, second, and _".to_string()],
            vec!["Line one\nline two".to_string()],
        );
        deck.write_csv(&path).unwrap();
        assert_eq!(Deck::read_csv(&path).unwrap(), deck);
    }

    #[test]
    fn test_csv_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let deck = sample_deck();
        deck.write_csv(&first).unwrap();
        deck.write_csv(&second).unwrap();
        assert_eq!(
            fs::read(&first).unwrap(),
            fs::read(&second).unwrap()
        );
    }

    #[test]
    fn test_csv_header_written_for_empty_deck() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deck.csv");
        Deck::default().write_csv(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Type,CardText\n");
    }

    #[test]
    fn test_read_missing_csv_is_fatal() {
        let err = Deck::read_csv(Path::new("/nonexistent/deck.csv")).unwrap_err();
        assert!(matches!(err, DeckError::MissingInput(_)));
    }

    #[test]
    fn test_renderer_export_files() {
        let dir = TempDir::new().unwrap();
        let deck = sample_deck();
        deck.write_renderer_export(dir.path(), "House Deck").unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("info.txt")).unwrap(),
            "House Deck\nv1.0\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("black.txt")).unwrap(),
            "What is _?\nWhy, oh why, _?\n"
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("white.txt")).unwrap(),
            "A sensible answer\n"
        );
    }
}
