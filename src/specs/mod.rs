// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Page-region extraction rules for a J! Archive game page. Each module reads one
//! region of the parsed [`Document`](crate::core::Document) and returns typed
//! records; none of them fetch, cache, or write anything.
//!
//! ## What lives here
//! - `metadata` – title (show number, air date) and the contestant roster.
//! - `rounds` – the two regular boards: categories, values, daily doubles,
//!   responses, reveal and triple-stumper flags.
//! - `final_round` – the single final clue with every responder's wager.
//! - `dialect` – the markup eras the archive has used, as a closed set of
//!   strategies selected by name (`modern`, `legacy`).
//! - `response` – reading a response block (correct response, right/wrong
//!   responders, wagers) once a dialect has located it.
//!
//! ## What does **not** live here
//! - Flattening clues to rows (`expand`), name resolution (`identity`), and
//!   ordering/stamping (`assemble`).
//!
//! ## Conventions & invariants
//! - Select by id and class, never by absolute position in the page.
//! - A broken clue cell costs that clue only: it is skipped and recorded as a
//!   [`ScrapeError::MalformedClue`](crate::error::ScrapeError) warning.
//! - Unrevealed cells are emitted, not dropped.
//!
//! ## Typical call chain
//! ```text
//! scrape::scrape_episode → specs::metadata::extract
//!                        → specs::rounds::extract      (dialect)
//!                        → specs::final_round::extract (dialect)
//! ```
pub mod dialect;
pub mod final_round;
pub mod metadata;
pub mod response;
pub mod rounds;

use crate::error::ScrapeError;

/// Extracted value plus the recoverable problems met on the way.
#[derive(Debug)]
pub struct Extraction<T> {
    pub value: T,
    pub warnings: Vec<ScrapeError>,
}

impl<T> Extraction<T> {
    pub fn new(value: T) -> Self {
        Self { value, warnings: Vec::new() }
    }

    pub fn warn(&mut self, err: ScrapeError) {
        logw!("{err}");
        self.warnings.push(err);
    }
}
