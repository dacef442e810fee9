//! Batch-file merge.
//!
//! Collects per-category `*_batch*.txt` files and flattens them into ordered
//! card lists. Unlike extraction, duplicates and ordering are preserved
//! exactly as the batch files provide them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::card::{strip_ordinal, CardKind};
use crate::deck::Deck;
use crate::error::{DeckError, Result};

/// Batch files for one category under `dir`, in lexicographic order.
pub fn batch_files(dir: &Path, kind: CardKind) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(kind.batch_pattern());
    let mut files = glob::glob(&pattern.to_string_lossy())?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    files.sort();
    Ok(files)
}

/// Read card lines from batch files: trim, drop blanks, strip a leading
/// `"N. "` ordinal prefix.
pub fn read_cards(files: &[PathBuf]) -> Result<Vec<String>> {
    let mut cards = Vec::new();
    for file in files {
        let content = fs::read_to_string(file)?;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let text = strip_ordinal(line);
            if !text.is_empty() {
                cards.push(text.to_string());
            }
        }
    }
    Ok(cards)
}

/// Merge every batch file under `batch_dir` into a deck.
///
/// Having no batch files for either category is fatal.
pub fn assemble_deck(batch_dir: &Path) -> Result<Deck> {
    let prompts = load_kind(batch_dir, CardKind::Prompt)?;
    let responses = load_kind(batch_dir, CardKind::Response)?;
    Ok(Deck::new(prompts, responses))
}

fn load_kind(batch_dir: &Path, kind: CardKind) -> Result<Vec<String>> {
    let files = batch_files(batch_dir, kind)?;
    if files.is_empty() {
        return Err(DeckError::MissingInput(format!(
            "no {} files in {}",
            kind.batch_pattern(),
            batch_dir.display()
        )));
    }
    read_cards(&files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_batch_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prompts_batch2.txt"), "1. b\n").unwrap();
        fs::write(dir.path().join("prompts_batch1.txt"), "1. a\n").unwrap();
        fs::write(dir.path().join("responses_batch1.txt"), "1. r\n").unwrap();

        let files = batch_files(dir.path(), CardKind::Prompt).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["prompts_batch1.txt", "prompts_batch2.txt"]);
    }

    #[test]
    fn test_read_cards_strips_ordinals_and_blanks() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("prompts_batch1.txt");
        fs::write(&file, "1. First card\n\n  42. Some card text  \nUnnumbered card\n").unwrap();

        let cards = read_cards(&[file]).unwrap();
        assert_eq!(
            cards,
            vec!["First card", "Some card text", "Unnumbered card"]
        );
    }

    #[test]
    fn test_duplicates_and_order_preserved() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("responses_batch1.txt");
        let second = dir.path().join("responses_batch2.txt");
        fs::write(&first, "1. Twice\n2. Once\n").unwrap();
        fs::write(&second, "1. Twice\n").unwrap();

        let files = batch_files(dir.path(), CardKind::Response).unwrap();
        let cards = read_cards(&files).unwrap();
        assert_eq!(cards, vec!["Twice", "Once", "Twice"]);
    }

    #[test]
    fn test_assemble_requires_both_categories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prompts_batch1.txt"), "1. Only prompts\n").unwrap();

        let err = assemble_deck(dir.path()).unwrap_err();
        assert!(matches!(err, DeckError::MissingInput(_)));
    }

    #[test]
    fn test_assemble_deck_merges_both_kinds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prompts_batch1.txt"), "1. A prompt\n").unwrap();
        fs::write(dir.path().join("responses_batch1.txt"), "1. An answer\n2. Another\n").unwrap();

        let deck = assemble_deck(dir.path()).unwrap();
        assert_eq!(deck.prompts, vec!["A prompt"]);
        assert_eq!(deck.responses, vec!["An answer", "Another"]);
        assert_eq!(deck.total(), 3);
    }
}
