// src/assemble.rs
//
// Final table: episode stamps, identities, fixed column order, stable sort.

use crate::expand::FlatRow;
use crate::identity::{resolve, IdentityMap};
use crate::model::{Episode, Row, COLUMNS};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpisodeTable {
    pub rows: Vec<Row>,
}

impl EpisodeTable {
    pub fn headers() -> Vec<String> {
        COLUMNS.iter().map(|c| s!(*c)).collect()
    }

    /// Rows as string cells in column order.
    pub fn records(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(Row::to_record).collect()
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

/// Round rows then final rows, each stamped with the episode and the
/// responder's identity, sorted by round and then selection order. Rows with no
/// order (unrevealed clues) go last within their round; ties keep input order.
pub fn assemble(
    episode: &Episode,
    round_rows: Vec<FlatRow>,
    final_rows: Vec<FlatRow>,
    identities: &IdentityMap,
) -> EpisodeTable {
    let mut rows: Vec<Row> = round_rows
        .into_iter()
        .chain(final_rows)
        .map(|r| stamp(episode, r, identities))
        .collect();
    sort_rows(&mut rows);
    EpisodeTable { rows }
}

pub fn sort_rows(rows: &mut [Row]) {
    rows.sort_by_key(|r| (r.round_num, r.order_num.is_none(), r.order_num));
}

fn stamp(episode: &Episode, r: FlatRow, identities: &IdentityMap) -> Row {
    let (name, player_id) = resolve(r.responder.as_deref(), identities);
    Row {
        show_num: episode.show_num,
        game_id: episode.game_id,
        date: episode.date,
        clue_id: r.clue_id,
        clue_location: r.clue_location,
        round_num: r.round.num(),
        value: r.value,
        order_num: r.order_num,
        category: r.category,
        answer: r.answer,
        correct_response: r.correct_response,
        name,
        player_id,
        was_correct: r.was_correct,
        was_revealed: r.was_revealed,
        was_triple_stumper: r.was_triple_stumper,
        was_daily_double: r.was_daily_double,
        wager: r.wager,
        responder: r.responder,
    }
}
