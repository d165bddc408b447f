// src/expand.rs
//
// Clue records (attempts nested) → one flat row per (clue, responder).

use crate::config::options::EmptyCluePolicy;
use crate::model::{Clue, Round};

/// A clue field set repeated for one responder. Episode fields and resolved
/// identities are added later by `assemble`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlatRow {
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
    /// `None` on the placeholder row of a clue nobody answered.
    pub responder: Option<String>,
    pub was_correct: Option<bool>,
    pub wager: Option<i64>,
}

impl FlatRow {
    fn from_clue(clue: &Clue) -> Self {
        Self {
            clue_id: clue.clue_id.clone(),
            clue_location: clue.clue_location.clone(),
            round: clue.round,
            category: clue.category.clone(),
            value: clue.value,
            order_num: clue.order_num,
            answer: clue.answer.clone(),
            correct_response: clue.correct_response.clone(),
            was_daily_double: clue.was_daily_double,
            was_triple_stumper: clue.was_triple_stumper,
            was_revealed: clue.was_revealed,
            responder: None,
            was_correct: None,
            wager: None,
        }
    }
}

/// Attempts keep their listed order. Clues with no attempts produce one
/// responder-less row under `Retain` and nothing under `Omit`.
pub fn expand(clues: &[Clue], policy: EmptyCluePolicy) -> Vec<FlatRow> {
    let mut out = Vec::with_capacity(clues.len() * 2);
    for clue in clues {
        if clue.attempts.is_empty() {
            if policy == EmptyCluePolicy::Retain {
                out.push(FlatRow::from_clue(clue));
            }
            continue;
        }
        let base = FlatRow::from_clue(clue);
        for a in &clue.attempts {
            out.push(FlatRow {
                responder: Some(a.responder.clone()),
                was_correct: Some(a.was_correct),
                wager: a.wager,
                ..base.clone()
            });
        }
    }
    out
}
