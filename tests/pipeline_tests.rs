//! End-to-end tests for the four pipeline stages, driven through the
//! library API on temporary directories.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use deckforge::assemble::assemble_deck;
use deckforge::extract::{extract_cards, write_numbered_list, ExtractConfig};
use deckforge::score::{load_scores, ScoreWeights};
use deckforge::{select_top, CardKind, Deck, TargetCounts};

// =============================================================================
// Extract stage
// =============================================================================

mod extract_stage {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_export_to_numbered_lists() {
        let dir = TempDir::new().unwrap();
        let export = dir.path().join("export.csv");
        fs::write(
            &export,
            "Prompt,Why _?,,,,,,,,,,Response,Because.\n\
             Prompt,Why _?,,,,,,,,,,Response,A duck\n\
             Response,Because.\n",
        )
        .unwrap();

        let sets = extract_cards(&export, &ExtractConfig::default()).unwrap();
        assert_eq!(sets.prompts.len(), 1);
        assert_eq!(sets.responses.len(), 2);

        let list = dir.path().join("extracted_responses.txt");
        write_numbered_list(sets.get(CardKind::Response), &list).unwrap();
        assert_eq!(
            fs::read_to_string(&list).unwrap(),
            "1. A duck\n2. Because.\n"
        );
    }

    #[test]
    fn test_dedup_survives_embedded_newlines() {
        let dir = TempDir::new().unwrap();
        let export = dir.path().join("export.csv");
        // The same multi-line card twice: one card in the set, flattened
        // on output.
        fs::write(&export, "Prompt,\"Two\nlines\"\nPrompt,\"Two\nlines\"\n").unwrap();

        let sets = extract_cards(&export, &ExtractConfig::default()).unwrap();
        assert_eq!(sets.prompts.len(), 1);

        let list = dir.path().join("extracted_prompts.txt");
        write_numbered_list(sets.get(CardKind::Prompt), &list).unwrap();
        assert_eq!(fs::read_to_string(&list).unwrap(), "1. Two lines\n");
    }
}

// =============================================================================
// Assemble stage
// =============================================================================

mod assemble_stage {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seed_batches(dir: &TempDir) {
        fs::write(
            dir.path().join("prompts_batch1.txt"),
            "1. What is _?\n2. Who said _?\n",
        )
        .unwrap();
        fs::write(dir.path().join("prompts_batch2.txt"), "1. Where is _?\n").unwrap();
        fs::write(
            dir.path().join("responses_batch1.txt"),
            "1. A tiny hat\n2. Breakfast\n",
        )
        .unwrap();
    }

    #[test]
    fn test_batches_to_canonical_csv() {
        let dir = TempDir::new().unwrap();
        seed_batches(&dir);

        let deck = assemble_deck(dir.path()).unwrap();
        assert_eq!(deck.prompts, vec!["What is _?", "Who said _?", "Where is _?"]);
        assert_eq!(deck.responses, vec!["A tiny hat", "Breakfast"]);

        let csv_path = dir.path().join("deck.csv");
        deck.write_csv(&csv_path).unwrap();
        assert_eq!(
            fs::read_to_string(&csv_path).unwrap(),
            "Type,CardText\n\
             Prompt,What is _?\n\
             Prompt,Who said _?\n\
             Prompt,Where is _?\n\
             Response,A tiny hat\n\
             Response,Breakfast\n"
        );
    }

    #[test]
    fn test_reassembly_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        seed_batches(&dir);

        let first_path = dir.path().join("first.csv");
        let second_path = dir.path().join("second.csv");
        assemble_deck(dir.path()).unwrap().write_csv(&first_path).unwrap();
        assemble_deck(dir.path()).unwrap().write_csv(&second_path).unwrap();

        assert_eq!(fs::read(&first_path).unwrap(), fs::read(&second_path).unwrap());
    }

    #[test]
    fn test_renderer_export_round() {
        let dir = TempDir::new().unwrap();
        seed_batches(&dir);

        let deck = assemble_deck(dir.path()).unwrap();
        let export_dir = dir.path().join("export");
        deck.write_renderer_export(&export_dir, "House Deck").unwrap();

        assert_eq!(
            fs::read_to_string(export_dir.join("black.txt")).unwrap(),
            "What is _?\nWho said _?\nWhere is _?\n"
        );
        assert_eq!(
            fs::read_to_string(export_dir.join("white.txt")).unwrap(),
            "A tiny hat\nBreakfast\n"
        );
    }
}

// =============================================================================
// Select stage
// =============================================================================

mod select_stage {
    use super::*;
    use pretty_assertions::assert_eq;

    fn score_record(kind: &str, text: &str, humor: f64) -> String {
        format!(
            r#"{{"type": "{kind}", "card_text": "{text}", "humor": {humor},
                "appropriateness": 5, "versatility": 5, "cultural_relevance": 5,
                "specificity": 5, "originality": 5}}"#
        )
    }

    #[test]
    fn test_scores_to_curated_deck() {
        let dir = TempDir::new().unwrap();
        let scores = dir.path().join("scores");
        fs::create_dir(&scores).unwrap();

        // Prompts arrive across two batch files; file order is by name.
        let batch1: Vec<String> = (0..4)
            .map(|i| score_record("Prompt", &format!("p{i}"), i as f64))
            .collect();
        let batch2 = vec![
            score_record("Response", "r good", 9.0),
            score_record("Response", "r bad", 1.0),
            score_record("Response", "r mid", 5.0),
        ];
        fs::write(scores.join("batch_001.json"), format!("[{}]", batch1.join(",")))
            .unwrap();
        fs::write(scores.join("batch_002.json"), format!("[{}]", batch2.join(",")))
            .unwrap();

        let cards = load_scores(&scores, &ScoreWeights::default()).unwrap();
        assert_eq!(cards.len(), 7);

        let targets = TargetCounts { prompts: 2, responses: 2 };
        let selection = select_top(cards, &targets);
        assert_eq!(selection.kept_total(), 4);

        // Curated CSV carries prompts in rank order, then responses.
        let deck = Deck::new(
            selection.prompts.kept.iter().map(|c| c.text.clone()).collect(),
            selection.responses.kept.iter().map(|c| c.text.clone()).collect(),
        );
        let csv_path = dir.path().join("curated.csv");
        deck.write_csv(&csv_path).unwrap();
        assert_eq!(
            fs::read_to_string(&csv_path).unwrap(),
            "Type,CardText\n\
             Prompt,p3\n\
             Prompt,p2\n\
             Response,r good\n\
             Response,r mid\n"
        );
    }

    #[test]
    fn test_underfilled_targets_produce_short_deck() {
        let dir = TempDir::new().unwrap();
        let scores = dir.path().join("scores");
        fs::create_dir(&scores).unwrap();
        fs::write(
            scores.join("batch_001.json"),
            format!("[{}]", score_record("Prompt", "lonely", 5.0)),
        )
        .unwrap();

        let cards = load_scores(&scores, &ScoreWeights::default()).unwrap();
        let selection = select_top(cards, &TargetCounts::default());
        assert_eq!(selection.kept_total(), 1);
        assert!(selection.responses.kept.is_empty());
    }

    #[test]
    fn test_full_deck_is_exactly_612() {
        let dir = TempDir::new().unwrap();
        let scores = dir.path().join("scores");
        fs::create_dir(&scores).unwrap();

        let mut records = Vec::new();
        for i in 0..110 {
            records.push(score_record("Prompt", &format!("p{i}"), (i % 10) as f64));
        }
        for i in 0..520 {
            records.push(score_record("Response", &format!("r{i}"), (i % 10) as f64));
        }
        fs::write(scores.join("batch_001.json"), format!("[{}]", records.join(",")))
            .unwrap();

        let cards = load_scores(&scores, &ScoreWeights::default()).unwrap();
        let selection = select_top(cards, &TargetCounts::default());
        assert_eq!(selection.prompts.kept.len(), 102);
        assert_eq!(selection.responses.kept.len(), 510);
        assert_eq!(selection.kept_total(), 612);

        // No kept card scores below a dropped card of the same category.
        for part in [&selection.prompts, &selection.responses] {
            let worst_kept = part.cutoff().unwrap().weighted_score;
            assert!(part.cut.iter().all(|c| c.weighted_score <= worst_kept));
        }
    }
}
