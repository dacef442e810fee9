#![forbid(unsafe_code)]
//! Deckforge command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use deckforge::commands::{
    execute_assemble, execute_extract, execute_render, execute_select, AssembleOptions,
    ExtractOptions, RenderOptions, SelectOptions,
};
use deckforge::Config;

#[derive(Parser)]
#[command(name = "deckforge")]
#[command(about = "Card deck extraction, curation, and rendering pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = ".deckforge.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract unique cards from a raw spreadsheet export
    Extract {
        /// Export CSV to read (defaults to the configured source)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Directory for the numbered card lists
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Merge batch text files into the canonical deck CSV
    Assemble {
        /// Also rasterize preview card images
        #[arg(long)]
        images: bool,
    },

    /// Score, rank, and keep the top cards per category
    Select {
        /// Scores directory to read (defaults to the configured path)
        #[arg(long)]
        scores_dir: Option<PathBuf>,
    },

    /// Render print-resolution card images and bundle them
    Render {
        /// Deck CSV to render (defaults to the curated deck)
        csv: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = if cli.config.exists() {
        match Config::load(&cli.config) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{} Failed to load {}: {}", style("✗").red(), cli.config.display(), err);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Extract { input, out_dir } => {
            execute_extract(ExtractOptions { input, out_dir }, &config)
        }
        Commands::Assemble { images } => execute_assemble(AssembleOptions { images }, &config),
        Commands::Select { scores_dir } => execute_select(SelectOptions { scores_dir }, &config),
        Commands::Render { csv } => execute_render(RenderOptions { csv }, &config),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", style("✗").red(), err);
        std::process::exit(1);
    }
}
