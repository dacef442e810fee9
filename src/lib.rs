#![forbid(unsafe_code)]

//! # Deckforge
//!
//! Batch pipeline that turns raw card-game spreadsheet exports into a
//! print-ready deck.
//!
//! ## Stages
//!
//! - **Extract**: parse a dual-section spreadsheet export, deduplicate cards
//! - **Assemble**: merge batch text files into the canonical deck CSV
//! - **Select**: weight external quality scores, rank, keep the top N
//! - **Render**: draw cards onto templates and bundle the images
//!
//! ## Example
//!
//! ```rust,no_run
//! use deckforge::{Config, Deck};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let deck = Deck::read_csv(&config.paths.curated_csv)?;
//!     println!("{} cards ready to render", deck.total());
//!     Ok(())
//! }
//! ```

pub mod assemble;
pub mod card;
pub mod commands;
pub mod config;
pub mod deck;
pub mod error;
pub mod extract;
pub mod render;
pub mod score;

// Re-exports
pub use card::{Card, CardKind};
pub use config::Config;
pub use deck::Deck;
pub use error::{DeckError, Result};
pub use score::selector::{select_top, DeckSelection, TargetCounts};
pub use score::{ScoreWeights, ScoredCard};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
