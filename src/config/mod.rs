//! Project configuration loading and defaults.
//!
//! Every stage reads its paths, weights, and layout from here instead of
//! process-wide constants, so tests can inject their own inputs and outputs.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::extract::ExtractConfig;
use crate::render::preview::PreviewLayout;
use crate::render::RenderLayout;
use crate::score::selector::TargetCounts;
use crate::score::ScoreWeights;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = ".deckforge.json";

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_game_name() -> String {
    "Deckforge".to_string()
}

/// Main deckforge configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Game name drawn on card footers, backs, and export metadata
    #[serde(default = "default_game_name")]
    pub game_name: String,

    /// Input and output locations for every stage
    #[serde(default)]
    pub paths: PathsConfig,

    /// Extraction stage settings (section offsets, list file names)
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Rubric weights for the composite card score
    #[serde(default)]
    pub weights: ScoreWeights,

    /// Final deck size per category
    #[serde(default)]
    pub targets: TargetCounts,

    /// Print-resolution card layout
    #[serde(default)]
    pub layout: RenderLayout,

    /// Preview card layout for `assemble --images`
    #[serde(default)]
    pub preview: PreviewLayout,

    /// Font files tried in order for all text drawing
    #[serde(default = "default_font_candidates")]
    pub font_paths: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            game_name: default_game_name(),
            paths: PathsConfig::default(),
            extract: ExtractConfig::default(),
            weights: ScoreWeights::default(),
            targets: TargetCounts::default(),
            layout: RenderLayout::default(),
            preview: PreviewLayout::default(),
            font_paths: default_font_candidates(),
        }
    }
}

impl Config {
    /// Load config from a JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save config to a file.
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from the default location or fall back to defaults.
    pub fn load_or_default() -> Self {
        Self::load(CONFIG_FILE).unwrap_or_default()
    }
}

fn default_font_candidates() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
        "/System/Library/Fonts/Helvetica.ttc",
        "/System/Library/Fonts/HelveticaNeue.ttc",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Input and output locations for every stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Raw spreadsheet export read by the extract stage
    #[serde(default = "default_source_csv")]
    pub source_csv: PathBuf,

    /// Directory holding the numbered card lists written by extract
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Directory scanned for `*_batch*.txt` files by assemble
    #[serde(default = "default_out_dir")]
    pub batch_dir: PathBuf,

    /// Directory scanned for `batch_*.json` score files by select
    #[serde(default = "default_scores_dir")]
    pub scores_dir: PathBuf,

    /// Canonical deck CSV written by assemble
    #[serde(default = "default_deck_csv")]
    pub deck_csv: PathBuf,

    /// Curated deck CSV written by select
    #[serde(default = "default_curated_csv")]
    pub curated_csv: PathBuf,

    /// Directory for the external sheet renderer's text files
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Directory for preview card images (`assemble --images`)
    #[serde(default = "default_preview_dir")]
    pub preview_dir: PathBuf,

    /// Directory holding the per-kind template bitmaps
    #[serde(default = "default_template_dir")]
    pub template_dir: PathBuf,

    /// Directory for print-resolution card images
    #[serde(default = "default_cards_dir")]
    pub cards_dir: PathBuf,

    /// ZIP archive bundling the rendered images
    #[serde(default = "default_archive")]
    pub archive: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            source_csv: default_source_csv(),
            out_dir: default_out_dir(),
            batch_dir: default_out_dir(),
            scores_dir: default_scores_dir(),
            deck_csv: default_deck_csv(),
            curated_csv: default_curated_csv(),
            export_dir: default_export_dir(),
            preview_dir: default_preview_dir(),
            template_dir: default_template_dir(),
            cards_dir: default_cards_dir(),
            archive: default_archive(),
        }
    }
}

fn default_source_csv() -> PathBuf {
    PathBuf::from("cards_export.csv")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_scores_dir() -> PathBuf {
    PathBuf::from("scores")
}

fn default_deck_csv() -> PathBuf {
    PathBuf::from("deck.csv")
}

fn default_curated_csv() -> PathBuf {
    PathBuf::from("deck_curated.csv")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("export")
}

fn default_preview_dir() -> PathBuf {
    PathBuf::from("preview_cards")
}

fn default_template_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_cards_dir() -> PathBuf {
    PathBuf::from("printable_cards")
}

fn default_archive() -> PathBuf {
    PathBuf::from("printable_cards/deck.zip")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trip() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.game_name, config.game_name);
        assert_eq!(parsed.paths.deck_csv, config.paths.deck_csv);
        assert_eq!(parsed.targets.prompts, 102);
        assert_eq!(parsed.targets.responses, 510);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: Config = serde_json::from_str(r#"{"game_name": "House Deck"}"#).unwrap();
        assert_eq!(parsed.game_name, "House Deck");
        assert_eq!(parsed.paths.scores_dir, PathBuf::from("scores"));
        assert_eq!(parsed.layout.font_size_min, 110);
    }
}
