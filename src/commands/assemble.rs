//! Assemble command: merge batch text files into the canonical deck.

use anyhow::Result;
use console::style;

use crate::assemble;
use crate::card::CardKind;
use crate::config::Config;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::render::preview;

/// Options for the assemble command
#[derive(Debug, Clone, Default)]
pub struct AssembleOptions {
    /// Also rasterize preview card images
    pub images: bool,
}

/// Execute the assemble command
pub fn execute_assemble(options: AssembleOptions, config: &Config) -> Result<()> {
    let batch_dir = &config.paths.batch_dir;

    let prompts = load_kind(batch_dir, CardKind::Prompt)?;
    let responses = load_kind(batch_dir, CardKind::Response)?;
    let deck = Deck::new(prompts, responses);

    deck.write_csv(&config.paths.deck_csv)?;
    println!(
        "{} CSV written: {}  ({} prompts + {} responses)",
        style("✓").green(),
        config.paths.deck_csv.display(),
        deck.prompts.len(),
        deck.responses.len()
    );

    deck.write_renderer_export(&config.paths.export_dir, &config.game_name)?;
    println!(
        "{} Renderer export written to {}",
        style("✓").green(),
        config.paths.export_dir.display()
    );

    if options.images {
        let count = preview::render_previews(
            &deck,
            &config.paths.preview_dir,
            &config.preview,
            &config.font_paths,
            &config.game_name,
        )?;
        if count > 0 {
            println!(
                "{} {} preview images saved to {}",
                style("✓").green(),
                count,
                config.paths.preview_dir.display()
            );
        } else {
            println!(
                "{} Preview generation skipped (no usable font)",
                style("⚠").yellow()
            );
        }
    }

    println!("\n{} Done! Total: {} cards", style("✓").green(), deck.total());

    Ok(())
}

fn load_kind(batch_dir: &std::path::Path, kind: CardKind) -> Result<Vec<String>> {
    let files = assemble::batch_files(batch_dir, kind)?;
    if files.is_empty() {
        return Err(DeckError::MissingInput(format!(
            "no {} files in {}",
            kind.batch_pattern(),
            batch_dir.display()
        ))
        .into());
    }
    let cards = assemble::read_cards(&files)?;
    println!(
        "  Loaded {} {} cards from {} files",
        cards.len(),
        kind.label().to_lowercase(),
        files.len()
    );
    Ok(cards)
}
