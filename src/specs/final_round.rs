// src/specs/final_round.rs
//! The final round: one category, one clue, every contestant responds and wagers.
//!
//! ```text
//! div#final_jeopardy_round
//!   table.final_round
//!     td.category … td.category_name
//!     td.clue … td.clue_text#clue_FJ
//!     response block with (responder, wager) pairs   (where depends on the dialect)
//! ```
//! Older transcripts may lack the region entirely; that is reported as
//! `FinalRoundMissing` and the caller carries on without final rows.

use chrono::NaiveDate;

use super::dialect::Dialect;
use super::Extraction;
use crate::core::Document;
use crate::error::ScrapeError;
use crate::model::{Clue, Round};

pub const FINAL_LOCATION: &str = "FJ";

pub fn extract(doc: &Document, date: NaiveDate, dialect: Dialect) -> Result<Extraction<Clue>, ScrapeError> {
    let rules = dialect.rules();
    let region = doc
        .by_id(Round::Final.region_id())
        .ok_or(ScrapeError::FinalRoundMissing)?;
    let scope = region.find_class("table", "final_round").unwrap_or(region);

    let category = scope
        .find_class("td", "category_name")
        .map(|td| td.text())
        .unwrap_or_default();
    let answer = rules
        .prompt_cell(scope)
        .map(|td| td.text())
        .filter(|t| !t.is_empty());

    let mut clue = Clue {
        clue_id: Clue::make_id(date, FINAL_LOCATION),
        clue_location: s!(FINAL_LOCATION),
        round: Round::Final,
        category,
        value: None,
        order_num: Some(1),
        was_revealed: answer.is_some(),
        answer,
        correct_response: None,
        was_daily_double: false,
        was_triple_stumper: false,
        attempts: Vec::new(),
    };
    let mut out = Extraction::new(clue.clone());

    // Responses may sit outside the board table (legacy pages hang them on the
    // category cell), so search the whole region.
    match rules.final_response(doc, region) {
        Some(block) => {
            for a in block.attempts.iter().filter(|a| a.wager.is_none()) {
                out.warn(ScrapeError::malformed(
                    FINAL_LOCATION,
                    format!("no wager recorded for {}", a.responder),
                ));
            }
            clue.was_triple_stumper = clue.was_revealed && !block.any_correct();
            clue.correct_response = block.correct_response;
            clue.attempts = block.attempts;
        }
        None => out.warn(ScrapeError::malformed(FINAL_LOCATION, "missing response block")),
    }

    logd!("Final: {} responders in {:?}", clue.attempts.len(), clue.category);
    out.value = clue;
    Ok(out)
}
