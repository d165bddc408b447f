// tests/common/mod.rs
//
// Builds complete game pages in either markup era from a small description,
// so integration tests and benches can state expectations in terms of the
// fixture instead of hand-counted HTML.
#![allow(dead_code)]

use chrono::NaiveDate;
use jarchive_scrape::model::Round;

pub const COLS: usize = 6;
pub const ROWS: usize = 5;

#[derive(Clone, Debug)]
pub struct EpisodeFixture {
    pub show_num: u32,
    pub date: NaiveDate,
    pub legacy: bool,
    /// (full name, name shown on the scoreboard and in responses), roster order.
    pub contestants: Vec<(&'static str, &'static str)>,
    /// Cells left blank: (round, column, row), 1-based.
    pub hidden: Vec<(Round, usize, usize)>,
    /// (round, column, row, wager)
    pub daily_doubles: Vec<(Round, usize, usize, i64)>,
    pub with_final: bool,
    pub with_roster: bool,
}

impl Default for EpisodeFixture {
    fn default() -> Self {
        Self {
            show_num: 8045,
            date: NaiveDate::from_ymd_opt(2023, 9, 11).unwrap(),
            legacy: false,
            contestants: vec![("Amy Lee", "Amy"), ("Jim Brown", "Jimbo"), ("Sue Park", "Sue")],
            hidden: vec![(Round::Jeopardy, 6, 5), (Round::DoubleJeopardy, 1, 5)],
            daily_doubles: vec![(Round::Jeopardy, 3, 2, 1000), (Round::DoubleJeopardy, 5, 4, 3000)],
            with_final: true,
            with_roster: true,
        }
    }
}

impl EpisodeFixture {
    pub fn legacy() -> Self {
        Self { legacy: true, ..Self::default() }
    }

    /// Two contestants called Ben; the scoreboard disambiguates one as "Ben S.".
    pub fn shared_first_names() -> Self {
        Self {
            contestants: vec![("Ben Stone", "Ben S."), ("Amy Lee", "Amy"), ("Ben Chan", "Ben")],
            ..Self::default()
        }
    }

    pub fn is_hidden(&self, round: Round, col: usize, row: usize) -> bool {
        self.hidden.contains(&(round, col, row))
    }

    pub fn daily_double(&self, round: Round, col: usize, row: usize) -> Option<i64> {
        self.daily_doubles
            .iter()
            .find(|(r, c, w, _)| (*r, *c, *w) == (round, col, row))
            .map(|d| d.3)
    }

    fn names(&self) -> Vec<&'static str> {
        self.contestants.iter().map(|c| c.1).collect()
    }

    /// Responders for a revealed regular clue, plus whether the page shows the
    /// explicit "Triple Stumper" entry. Four patterns rotate over the board:
    /// one right; wrong then right; wrong then the marker; everyone wrong.
    pub fn attempts(&self, round: Round, col: usize, row: usize) -> (Vec<(&'static str, bool)>, bool) {
        let names = self.names();
        let n = names.len();
        let k = (col + row + round.num() as usize) % n;
        if self.daily_double(round, col, row).is_some() {
            return (vec![(names[k], true)], false);
        }
        match (col * 5 + row) % 4 {
            0 => (vec![(names[k], true)], false),
            1 => (vec![(names[k], false), (names[(k + 1) % n], true)], false),
            2 => (vec![(names[k], false)], true),
            _ => ((0..n).map(|i| (names[(k + i) % n], false)).collect(), false),
        }
    }

    pub fn final_wager(&self, seat: usize) -> i64 {
        1000 * (seat as i64 + 1) + 1
    }

    pub fn final_correct(&self, seat: usize) -> bool {
        seat % 2 == 1
    }

    /// Revealed regular clues' attempts plus one final attempt per contestant.
    pub fn total_attempts(&self) -> usize {
        let mut total = 0;
        for round in Round::REGULAR {
            for col in 1..=COLS {
                for row in 1..=ROWS {
                    if !self.is_hidden(round, col, row) {
                        total += self.attempts(round, col, row).0.len();
                    }
                }
            }
        }
        if self.with_final {
            total += self.contestants.len();
        }
        total
    }

    pub fn html(&self) -> String {
        let date = self.date.format("%A, %B %d, %Y");
        let mut out = format!(
            "<!DOCTYPE html>\n<html><head><title>J! Archive - Show #{}, aired {}</title></head><body>\n",
            self.show_num,
            self.date.format("%Y-%m-%d"),
        );
        out.push_str(&format!(
            r#"<div id="game_title"><h1>Show #{} - {date}</h1></div>"#,
            self.show_num
        ));
        out.push('\n');

        if self.with_roster {
            out.push_str(r#"<div id="contestants"><table id="contestants_table"><tr><td class="contestants_table">"#);
            for (i, (full, _)) in self.contestants.iter().enumerate() {
                out.push_str(&format!(
                    r#"<p class="contestants"><a href="showplayer.php?player_id={}">{full}</a>, a contestant from somewhere</p>"#,
                    100 + i
                ));
            }
            out.push_str("</td></tr></table></div>\n");
        }

        for round in Round::REGULAR {
            out.push_str(&self.board(round));
            out.push('\n');
        }
        if self.with_final {
            out.push_str(&self.final_round());
        }
        out.push_str("\n</body></html>\n");
        out
    }

    fn board(&self, round: Round) -> String {
        let step = round.board_step(self.date).unwrap_or(0);

        // Selection order runs down the columns, skipping blank cells.
        let mut order = [[0u32; COLS]; ROWS];
        let mut n = 0;
        for col in 1..=COLS {
            for row in 1..=ROWS {
                if !self.is_hidden(round, col, row) {
                    n += 1;
                    order[row - 1][col - 1] = n;
                }
            }
        }

        let mut html = format!(
            r#"<div id="{}"><h2>{} Round</h2><table class="round"><tr>"#,
            round.region_id(),
            round.code()
        );
        for col in 1..=COLS {
            html.push_str(&format!(
                r#"<td class="category"><table><tr><td class="category_name">{}</td></tr><tr><td class="category_comments"></td></tr></table></td>"#,
                category_name(round, col)
            ));
        }
        html.push_str("</tr>");
        for row in 1..=ROWS {
            html.push_str("<tr>");
            for col in 1..=COLS {
                html.push_str(&self.cell(round, col, row, step * row as i64, order[row - 1][col - 1]));
            }
            html.push_str("</tr>");
        }
        html.push_str("</table>");
        html.push_str(&self.scoreboard());
        html.push_str("</div>");
        html
    }

    fn cell(&self, round: Round, col: usize, row: usize, value: i64, order: u32) -> String {
        if self.is_hidden(round, col, row) {
            return String::from(r#"<td class="clue"></td>"#);
        }
        let loc = format!("{}_{col}_{row}", round.code());
        let value_td = match self.daily_double(round, col, row) {
            Some(w) => format!(r#"<td class="clue_value_daily_double">DD: ${}</td>"#, money(w)),
            None => format!(r#"<td class="clue_value">${}</td>"#, money(value)),
        };
        let header = format!(
            r#"<table class="clue_header"><tr>{value_td}<td class="clue_order_number"><a href="suggestcorrection.php?clue_id={order}">{order}</a></td></tr></table>"#
        );
        let prompt = prompt_text(&loc);

        let (attempts, marker) = self.attempts(round, col, row);
        let mut tds: String = attempts
            .iter()
            .map(|(who, ok)| format!(r#"<td class="{}">{who}</td>"#, if *ok { "right" } else { "wrong" }))
            .collect();
        if marker {
            tds.push_str(r#"<td class="wrong">Triple Stumper</td>"#);
        }
        let response = format!(
            r#"<em class="correct_response">{}</em><br /><br /><table width="100%"><tr>{tds}</tr></table>"#,
            response_text(&loc)
        );

        if self.legacy {
            format!(
                r#"<td class="clue"><table><tr><td><div onmouseover="toggle('clue_{loc}', 'clue_{loc}_stuck', '{}')" onmouseout="toggle('clue_{loc}', 'clue_{loc}_stuck', '{prompt}')">{header}</div></td></tr><tr><td id="clue_{loc}" class="clue_text">{prompt}</td></tr></table></td>"#,
                encode_attr(&response)
            )
        } else {
            format!(
                r#"<td class="clue"><table><tr><td>{header}</td></tr><tr><td id="clue_{loc}" class="clue_text">{prompt}</td></tr><tr><td id="clue_{loc}_r" class="clue_text" style="display:none;">{response}</td></tr></table></td>"#
            )
        }
    }

    /// Seats left to right: the roster reversed.
    fn scoreboard(&self) -> String {
        let nicks: String = self
            .names()
            .iter()
            .rev()
            .map(|n| format!(r#"<td class="score_player_nickname">{n}</td>"#))
            .collect();
        let scores: String = self.names().iter().map(|_| r#"<td class="score_positive">$0</td>"#).collect();
        format!(r#"<h3>Scores at the end of the round:</h3><table><tr>{nicks}</tr><tr>{scores}</tr></table>"#)
    }

    fn final_round(&self) -> String {
        let mut rows = String::new();
        for (seat, name) in self.names().iter().enumerate() {
            let ok = self.final_correct(seat);
            rows.push_str(&format!(
                r#"<tr><td class="{}">{name}</td><td rowspan="2" valign="top">What is {}?</td></tr><tr><td>${}</td></tr>"#,
                if ok { "right" } else { "wrong" },
                if ok { "Final response" } else { "Wrong guess" },
                money(self.final_wager(seat)),
            ));
        }
        let block = format!(r#"<table>{rows}</table><em class="correct_response">Final response</em>"#);
        let category = r#"<table><tr><td class="category_name">FINAL CATEGORY</td></tr><tr><td class="category_comments"></td></tr></table>"#;
        let prompt = r#"<tr><td id="clue_FJ" class="clue_text">The final prompt</td></tr>"#;

        if self.legacy {
            format!(
                r#"<div id="final_jeopardy_round"><h2>Final Jeopardy! Round</h2><table class="final_round"><tr><td class="category"><div onmouseover="toggle('clue_FJ', 'clue_FJ_stuck', '{}')" onmouseout="toggle('clue_FJ', 'clue_FJ_stuck', 'The final prompt')">{category}</div></td></tr><tr><td class="clue"><table>{prompt}</table></td></tr></table></div>"#,
                encode_attr(&block)
            )
        } else {
            format!(
                r#"<div id="final_jeopardy_round"><h2>Final Jeopardy! Round</h2><table class="final_round"><tr><td class="category">{category}</td></tr><tr><td class="clue"><table>{prompt}<tr><td id="clue_FJ_r" class="clue_text" style="display:none;">{block}</td></tr></table></td></tr></table></div>"#
            )
        }
    }
}

pub fn category_name(round: Round, col: usize) -> String {
    format!("{} CATEGORY {col}", round.code())
}

pub fn prompt_text(loc: &str) -> String {
    format!("Prompt for {loc}")
}

pub fn response_text(loc: &str) -> String {
    format!("Response for {loc}")
}

/// `12345` → `12,345`
pub fn money(v: i64) -> String {
    let digits = v.abs().to_string();
    let mut out = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if v < 0 { format!("-{out}") } else { out }
}

/// Markup as it appears inside a double-quoted attribute.
fn encode_attr(html: &str) -> String {
    html.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
