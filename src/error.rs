// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while turning one transcript into rows.
///
/// Only `MetadataMissing` and `EmptyDocument` abort an episode. The rest are
/// collected into [`crate::scrape::ScrapeReport`] and the episode carries on.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("episode metadata missing: {0}")]
    MetadataMissing(&'static str),

    #[error("document has no content")]
    EmptyDocument,

    #[error("final round not found")]
    FinalRoundMissing,

    #[error("{0} round region has no board table")]
    BoardMissing(&'static str),

    #[error("malformed clue at {location}: {reason}")]
    MalformedClue { location: String, reason: String },

    #[error("no contestant matches display name {0:?}")]
    UnresolvedName(String),

    #[error("unknown markup dialect {0:?} (expected \"modern\" or \"legacy\")")]
    UnknownDialect(String),

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    pub fn malformed(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedClue { location: location.into(), reason: reason.into() }
    }

    /// Fatal errors end the episode; everything else is recorded and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MetadataMissing(_) | Self::EmptyDocument)
    }
}
