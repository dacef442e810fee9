//! Render command: print-resolution card faces, backs, and the ZIP bundle.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use console::style;
use indicatif::ProgressBar;

use crate::card::CardKind;
use crate::config::Config;
use crate::deck::Deck;
use crate::render::{self, archive};

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Deck CSV to render (defaults to the curated deck)
    pub csv: Option<PathBuf>,
}

/// Execute the render command
pub fn execute_render(options: RenderOptions, config: &Config) -> Result<()> {
    let csv_path = options.csv.unwrap_or_else(|| config.paths.curated_csv.clone());

    let deck = Deck::read_csv(&csv_path)
        .with_context(|| format!("reading deck CSV {} (run 'deckforge select' first)", csv_path.display()))?;
    println!(
        "  Loaded {} prompts, {} responses",
        deck.prompts.len(),
        deck.responses.len()
    );

    let font = render::load_font(&config.font_paths)?;
    let layout = &config.layout;
    let cards_dir = &config.paths.cards_dir;

    let backs_dir = cards_dir.join("backs");
    fs::create_dir_all(&backs_dir)?;
    for kind in CardKind::ALL {
        let back = render::render_back(kind, layout, &font, &config.game_name);
        back.save(backs_dir.join(render::back_file(kind)))?;
    }
    println!("{} Card backs saved to {}", style("✓").green(), backs_dir.display());

    for kind in CardKind::ALL {
        let template = render::load_template(&config.paths.template_dir, kind)?;
        let template = render::rebrand_template(template, kind, layout, &font, &config.game_name);

        let out_dir = cards_dir.join(render::output_dir_name(kind));
        fs::create_dir_all(&out_dir)?;

        let cards = deck.by_kind(kind);
        println!(
            "{} Rendering {} {} cards...",
            style("→").cyan(),
            cards.len(),
            kind.label().to_lowercase()
        );
        let bar = ProgressBar::new(cards.len() as u64);
        for (i, text) in cards.iter().enumerate() {
            let img = render::render_card(&template, text, kind, layout, &font);
            img.save(out_dir.join(format!("{}_{:03}.png", render::file_prefix(kind), i + 1)))?;
            bar.inc(1);
        }
        bar.finish_and_clear();
        println!("{} {} images saved to {}", style("✓").green(), cards.len(), out_dir.display());
    }

    let count = archive::write_archive(cards_dir, &config.paths.archive)?;
    println!(
        "\n{} Done! {} images archived to {}",
        style("✓").green(),
        count,
        config.paths.archive.display()
    );

    Ok(())
}
