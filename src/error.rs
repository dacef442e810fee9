//! Error types shared across the pipeline stages.

use thiserror::Error;

/// Convenience alias used throughout the library.
pub type Result<T> = std::result::Result<T, DeckError>;

/// Everything that can stop a pipeline stage.
///
/// Only `MissingInput` and `FontUnavailable` are produced deliberately; the
/// rest wrap underlying library failures. Recoverable problems (malformed
/// score records, unusable preview fonts) are logged and skipped instead of
/// surfacing here.
#[derive(Debug, Error)]
pub enum DeckError {
    /// A required input file, directory, or template is absent.
    #[error("missing required input: {0}")]
    MissingInput(String),

    /// None of the configured font candidates could be loaded.
    #[error("no usable font found among configured candidates")]
    FontUnavailable,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("file discovery error: {0}")]
    Glob(#[from] glob::GlobError),
}
