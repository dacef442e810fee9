//! Extract command: pull unique cards out of the raw spreadsheet export.

use std::path::PathBuf;

use anyhow::Result;
use console::style;

use crate::card::CardKind;
use crate::config::Config;
use crate::extract;

/// Options for the extract command
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Export CSV to read (defaults to the configured source)
    pub input: Option<PathBuf>,
    /// Directory for the numbered card lists (defaults to the configured
    /// output directory)
    pub out_dir: Option<PathBuf>,
}

/// Execute the extract command
pub fn execute_extract(options: ExtractOptions, config: &Config) -> Result<()> {
    let input = options.input.unwrap_or_else(|| config.paths.source_csv.clone());
    let out_dir = options.out_dir.unwrap_or_else(|| config.paths.out_dir.clone());

    println!("{} Extracting cards from {}", style("→").cyan(), input.display());

    let sets = extract::extract_cards(&input, &config.extract)?;

    std::fs::create_dir_all(&out_dir)?;
    let prompts_path = out_dir.join(&config.extract.prompts_out);
    let responses_path = out_dir.join(&config.extract.responses_out);
    extract::write_numbered_list(sets.get(CardKind::Prompt), &prompts_path)?;
    extract::write_numbered_list(sets.get(CardKind::Response), &responses_path)?;

    println!(
        "{} Unique prompts:   {}  ->  {}",
        style("✓").green(),
        sets.get(CardKind::Prompt).len(),
        prompts_path.display()
    );
    println!(
        "{} Unique responses: {}  ->  {}",
        style("✓").green(),
        sets.get(CardKind::Response).len(),
        responses_path.display()
    );
    println!("  Total unique cards: {}", sets.total());

    Ok(())
}
