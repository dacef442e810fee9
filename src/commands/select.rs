//! Select command: weighted scoring, ranking, and truncation to the final
//! deck.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::card::CardKind;
use crate::config::Config;
use crate::deck::Deck;
use crate::score::selector::{select_top, DeckSelection};
use crate::score::{self, stats};

/// Options for the select command
#[derive(Debug, Clone, Default)]
pub struct SelectOptions {
    /// Scores directory to read (defaults to the configured path)
    pub scores_dir: Option<PathBuf>,
}

/// Execute the select command
pub fn execute_select(options: SelectOptions, config: &Config) -> Result<()> {
    let scores_dir = options.scores_dir.unwrap_or_else(|| config.paths.scores_dir.clone());

    println!(
        "{} Loading scored batches from {}",
        style("→").cyan(),
        scores_dir.display()
    );
    let cards = score::load_scores(&scores_dir, &config.weights)?;
    println!("  Loaded {} scored cards", cards.len());

    let selection = select_top(cards, &config.targets);
    print_stats(&selection);

    let deck = Deck::new(
        selection.prompts.kept.iter().map(|c| c.text.clone()).collect(),
        selection.responses.kept.iter().map(|c| c.text.clone()).collect(),
    );
    deck.write_csv(&config.paths.curated_csv)?;
    println!(
        "\n{} Curated deck written to {}  ({} cards)",
        style("✓").green(),
        config.paths.curated_csv.display(),
        deck.total()
    );

    Ok(())
}

fn print_stats(selection: &DeckSelection) {
    println!("\n{}", style("Scoring statistics").bold());

    for kind in CardKind::ALL {
        let part = selection.partition(kind);
        println!(
            "\n  {}: kept {} of {} (cut {})",
            part_title(kind),
            part.kept.len(),
            part.scored(),
            part.cut.len()
        );

        let all: Vec<_> = part.kept.iter().chain(part.cut.iter()).cloned().collect();
        if let Some(dist) = stats::distribution(&all) {
            println!("    Max:     {:.2}", dist.max);
            println!("    Top 25%: {:.2}", dist.upper_quartile);
            println!("    Median:  {:.2}", dist.median);
            println!("    Bot 25%: {:.2}", dist.lower_quartile);
            println!("    Min:     {:.2}", dist.min);
        }

        if let Some(cutoff) = part.cutoff() {
            println!(
                "    Cutoff:  {:.2}  (lowest kept: \"{}\")",
                cutoff.weighted_score,
                score::clip(&cutoff.text, 60)
            );
        }

        if !part.cut.is_empty() {
            println!("    Just missed the cut:");
            for card in part.cut.iter().take(5) {
                println!(
                    "      [{:.2}] {}",
                    card.weighted_score,
                    score::clip(&card.text, 70)
                );
            }
        }
    }

    let kept: Vec<_> = selection.kept_cards().cloned().collect();
    if let Some(averages) = stats::dimension_averages(&kept) {
        println!("\n  Average dimension scores (kept cards):");
        for (dim, avg) in averages {
            println!("    {:<20} {:.2}", dim, avg);
        }
    }
}

fn part_title(kind: CardKind) -> &'static str {
    match kind {
        CardKind::Prompt => "Prompts",
        CardKind::Response => "Responses",
    }
}
