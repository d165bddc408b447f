// src/model.rs
//
// Typed records for one episode: roster, clues with nested attempts, and the
// flat output row.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::consts::{FIRST_ROUND_STEP, SECOND_ROUND_STEP, VALUES_DOUBLED_ON};
use crate::core::sanitize::{name_key, normalize_ws};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Round {
    Jeopardy,
    DoubleJeopardy,
    Final,
}

impl Round {
    pub const REGULAR: [Round; 2] = [Round::Jeopardy, Round::DoubleJeopardy];

    /// 1, 2, 3 as written to the `round_num` column.
    pub fn num(self) -> u8 {
        match self { Round::Jeopardy => 1, Round::DoubleJeopardy => 2, Round::Final => 3 }
    }

    /// Prefix used in the page's clue ids (`clue_J_1_1`, `clue_DJ_3_4`, `clue_FJ`).
    pub fn code(self) -> &'static str {
        match self { Round::Jeopardy => "J", Round::DoubleJeopardy => "DJ", Round::Final => "FJ" }
    }

    /// `id` of the page region holding this round.
    pub fn region_id(self) -> &'static str {
        match self {
            Round::Jeopardy => "jeopardy_round",
            Round::DoubleJeopardy => "double_jeopardy_round",
            Round::Final => "final_jeopardy_round",
        }
    }

    /// Nominal value per board row for a game aired on `date`.
    pub fn board_step(self, date: NaiveDate) -> Option<i64> {
        let step = match self {
            Round::Jeopardy => FIRST_ROUND_STEP,
            Round::DoubleJeopardy => SECOND_ROUND_STEP,
            Round::Final => return None,
        };
        let (y, m, d) = VALUES_DOUBLED_ON;
        let doubled = NaiveDate::from_ymd_opt(y, m, d).is_some_and(|cut| date >= cut);
        Some(if doubled { step } else { step / 2 })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Contestant {
    pub full_name: String,
    /// Display names derived from the full name.
    pub short_name_variants: Vec<String>,
    /// Names taken from the scoreboard, kept apart from the derived ones.
    pub nicknames: Vec<String>,
}

/// Generational suffixes that never carry the surname initial.
const NAME_SUFFIXES: [&str; 5] = ["jr", "sr", "ii", "iii", "iv"];

fn is_suffix(token: &str) -> bool {
    let bare = token.trim_end_matches(['.', ',']).to_lowercase();
    NAME_SUFFIXES.contains(&bare.as_str())
}

impl Contestant {
    /// Full name, first name, and "First L." form.
    pub fn new(full_name: &str) -> Self {
        let full_name = normalize_ws(full_name);
        let mut parts: Vec<&str> = full_name.split(' ').collect();
        let mut variants = vec![full_name.clone()];
        if parts.len() > 1 {
            variants.push(s!(parts[0]));
            while parts.len() > 2 && parts.last().is_some_and(|t| is_suffix(t)) {
                parts.pop();
            }
            if let Some(initial) = parts[parts.len() - 1].chars().next() {
                variants.push(format!("{} {}.", parts[0], initial));
            }
        }
        Self { full_name, short_name_variants: variants, nicknames: Vec::new() }
    }

    pub fn add_nickname(&mut self, name: &str) {
        let name = normalize_ws(name);
        let key = name_key(&name);
        if name.is_empty() || self.nicknames.iter().any(|n| name_key(n) == key) { return; }
        self.nicknames.push(name);
    }

    /// The scoreboard lists exactly this name for the contestant.
    pub fn has_nickname(&self, short_name: &str) -> bool {
        let key = name_key(short_name);
        self.nicknames.iter().any(|n| name_key(n) == key)
    }

    pub fn matches(&self, short_name: &str) -> bool {
        let key = name_key(short_name);
        self.has_nickname(short_name) || self.short_name_variants.iter().any(|v| name_key(v) == key)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Episode {
    pub show_num: u32,
    pub game_id: u32,
    pub date: NaiveDate,
    pub contestants: Vec<Contestant>,
}

/// One contestant's response to a clue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attempt {
    /// Display name exactly as the transcript shows it.
    pub responder: String,
    pub was_correct: bool,
    /// Daily doubles and the final round only.
    pub wager: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clue {
    pub clue_id: String,
    pub clue_location: String,
    pub round: Round,
    pub category: String,
    pub value: Option<i64>,
    pub order_num: Option<u32>,
    pub answer: Option<String>,
    pub correct_response: Option<String>,
    pub was_daily_double: bool,
    pub was_triple_stumper: bool,
    pub was_revealed: bool,
    /// In response order.
    pub attempts: Vec<Attempt>,
}

impl Clue {
    /// `<date>_<location>`: unique within an episode, reproducible from the page.
    pub fn make_id(date: NaiveDate, location: &str) -> String {
        format!("{}_{location}", date.format("%Y-%m-%d"))
    }
}

/// Column order of the output table.
pub const COLUMNS: [&str; 18] = [
    "show_num", "game_id", "date", "clue_id", "clue_location", "round_num", "value",
    "order_num", "category", "answer", "correct_response", "name", "player_id",
    "was_correct", "was_revealed", "was_triple_stumper", "was_daily_double", "wager",
];

/// One (clue, responder) pair of the finished table. Field order is column order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Row {
    pub show_num: u32,
    pub game_id: u32,
    pub date: NaiveDate,
    pub clue_id: String,
    pub clue_location: String,
    pub round_num: u8,
    pub value: Option<i64>,
    pub order_num: Option<u32>,
    pub category: String,
    pub answer: Option<String>,
    pub correct_response: Option<String>,
    pub name: Option<String>,
    pub player_id: Option<u32>,
    pub was_correct: Option<bool>,
    pub was_revealed: bool,
    pub was_triple_stumper: bool,
    pub was_daily_double: bool,
    pub wager: Option<i64>,
    /// Raw display name; kept for audit, not an output column.
    #[serde(skip)]
    pub responder: Option<String>,
}

impl Row {
    /// Cells in [`COLUMNS`] order; nulls become empty strings.
    pub fn to_record(&self) -> Vec<String> {
        vec![
            self.show_num.to_string(),
            self.game_id.to_string(),
            self.date.format("%Y-%m-%d").to_string(),
            self.clue_id.clone(),
            self.clue_location.clone(),
            self.round_num.to_string(),
            opt_cell!(self.value),
            opt_cell!(self.order_num),
            self.category.clone(),
            opt_cell!(self.answer),
            opt_cell!(self.correct_response),
            opt_cell!(self.name),
            opt_cell!(self.player_id),
            opt_cell!(self.was_correct),
            self.was_revealed.to_string(),
            self.was_triple_stumper.to_string(),
            self.was_daily_double.to_string(),
            opt_cell!(self.wager),
        ]
    }
}
