// src/specs/rounds.rs
//! The two regular boards.
//!
//! Layout (both dialects):
//! ```text
//! div#jeopardy_round | div#double_jeopardy_round
//!   table.round
//!     tr: td.category  > … td.category_name   (× 6)
//!     tr: td.clue                             (× 6, one row per board row)
//!           table.clue_header: td.clue_value | td.clue_value_daily_double, td.clue_order_number
//!           td.clue_text#clue_<R>_<col>_<row>  (prompt)
//!           response block                     (where depends on the dialect)
//! ```
//! An empty `td.clue` is a clue that was never revealed.

use chrono::NaiveDate;

use super::dialect::{Dialect, MarkupRules};
use super::Extraction;
use crate::config::consts::{BOARD_COLUMNS, BOARD_ROWS};
use crate::core::sanitize::{leading_number, parse_money};
use crate::core::{Document, Element};
use crate::error::ScrapeError;
use crate::model::{Clue, Round};

/// All regular-round clues in page order (round, then board row, then column).
pub fn extract(doc: &Document, date: NaiveDate, dialect: Dialect) -> Extraction<Vec<Clue>> {
    let rules = dialect.rules();
    let mut out = Extraction::new(Vec::new());
    for round in Round::REGULAR {
        extract_round(doc, round, date, rules, &mut out);
    }
    logd!("Rounds: {} clues, {} warnings", out.value.len(), out.warnings.len());
    out
}

fn extract_round(
    doc: &Document,
    round: Round,
    date: NaiveDate,
    rules: &dyn MarkupRules,
    out: &mut Extraction<Vec<Clue>>,
) {
    let Some(region) = doc.by_id(round.region_id()) else {
        logd!("Rounds: no #{} region", round.region_id());
        return;
    };
    let Some(table) = region.find_class("table", "round") else {
        out.warn(ScrapeError::BoardMissing(round.code()));
        return;
    };

    let mut categories: Vec<String> = Vec::new();
    let mut board_row = 0usize;
    let mut clues: Vec<Clue> = Vec::new();

    for tr in table.rows() {
        let cells: Vec<Element<'_>> = tr.children_tagged("td").collect();
        if cells.iter().any(|td| td.has_class("category")) {
            categories = cells.iter().map(|td| category_label(*td)).collect();
            continue;
        }
        if !cells.iter().any(|td| td.has_class("clue")) {
            continue;
        }
        board_row += 1;
        if board_row > BOARD_ROWS || cells.len() != BOARD_COLUMNS {
            logd!("Rounds: irregular board row {board_row} ({} cells) in {}", cells.len(), round.code());
        }
        for (col, cell) in cells.iter().enumerate() {
            let pos = BoardPos { round, col: col + 1, row: board_row };
            let category = categories.get(col).cloned().unwrap_or_default();
            match read_clue(doc, *cell, pos, &category, date, rules) {
                Ok(clue) => place(&mut clues, clue, out),
                Err(e) => out.warn(e),
            }
        }
    }
    out.value.extend(clues);
}

/// Keep locations unique within a round. Short or ragged rows can give a blank
/// cell the board position of a revealed clue's own id; the revealed clue
/// wins, and any other repeat is dropped with a warning.
fn place(clues: &mut Vec<Clue>, clue: Clue, out: &mut Extraction<Vec<Clue>>) {
    let Some(i) = clues.iter().position(|c| c.clue_location == clue.clue_location) else {
        clues.push(clue);
        return;
    };
    let dropped = if clue.was_revealed && !clues[i].was_revealed {
        std::mem::replace(&mut clues[i], clue)
    } else {
        clue
    };
    let reason = if dropped.was_revealed { "duplicate board location" } else { "blank cell shares a clue's location" };
    out.warn(ScrapeError::malformed(dropped.clue_location, reason));
}

#[derive(Clone, Copy, Debug)]
struct BoardPos {
    round: Round,
    col: usize,
    row: usize,
}

impl BoardPos {
    /// Location derived from board coordinates, same shape as the page's own ids.
    fn location(&self) -> String {
        format!("{}_{}_{}", self.round.code(), self.col, self.row)
    }
}

fn category_label(td: Element<'_>) -> String {
    td.find_class("td", "category_name")
        .map(|e| e.text())
        .unwrap_or_else(|| td.text())
}

fn read_clue(
    doc: &Document,
    cell: Element<'_>,
    pos: BoardPos,
    category: &str,
    date: NaiveDate,
    rules: &dyn MarkupRules,
) -> Result<Clue, ScrapeError> {
    let nominal = pos.round.board_step(date).map(|step| step * pos.row as i64);

    let prompt = rules.prompt_cell(cell).map(|td| td.text()).filter(|t| !t.is_empty());
    let header = cell.find_class("table", "clue_header");

    // Nothing on the card: never revealed.
    if prompt.is_none() && header.is_none() {
        let location = pos.location();
        return Ok(Clue {
            clue_id: Clue::make_id(date, &location),
            clue_location: location,
            round: pos.round,
            category: s!(category),
            value: nominal,
            order_num: None,
            answer: None,
            correct_response: None,
            was_daily_double: false,
            was_triple_stumper: false,
            was_revealed: false,
            attempts: Vec::new(),
        });
    }

    let location = match rules.clue_location(cell) {
        Some(loc) => {
            if loc != pos.location() {
                logd!("Rounds: page location {loc} differs from board position {}", pos.location());
            }
            loc
        }
        None => pos.location(),
    };
    let bad = |reason: &str| ScrapeError::malformed(location.clone(), reason);

    let prompt = prompt.ok_or_else(|| bad("missing clue text"))?;

    let order_num = cell
        .find_class("td", "clue_order_number")
        .and_then(|td| leading_number(&td.text()))
        .ok_or_else(|| bad("missing order number"))?;

    let dd_wager = cell
        .find_class("td", "clue_value_daily_double")
        .map(|td| parse_money(&td.text()).ok_or_else(|| bad("unreadable daily double wager")))
        .transpose()?;
    let printed = cell
        .find_class("td", "clue_value")
        .and_then(|td| parse_money(&td.text()));
    let value = printed.or(nominal);

    let block = rules
        .response(doc, cell, &location)
        .ok_or_else(|| bad("missing response block"))?;

    let was_daily_double = dd_wager.is_some();
    let mut attempts = block.attempts.clone();
    if let (Some(wager), Some(first)) = (dd_wager, attempts.first_mut()) {
        first.wager = Some(wager);
    }
    if was_daily_double && attempts.len() > 1 {
        logd!("Rounds: daily double {location} lists {} responders", attempts.len());
    }
    // A daily double answered wrong by its one player is not a stumper.
    let was_triple_stumper = block.stumper_marker || (!was_daily_double && !block.any_correct());

    Ok(Clue {
        clue_id: Clue::make_id(date, &location),
        clue_location: location,
        round: pos.round,
        category: s!(category),
        value,
        order_num: Some(order_num),
        answer: Some(prompt),
        correct_response: block.correct_response,
        was_daily_double,
        was_triple_stumper,
        was_revealed: true,
        attempts,
    })
}
