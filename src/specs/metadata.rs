// src/specs/metadata.rs
//! Episode-level facts: show number, air date, contestant roster.
//!
//! Sources on the page:
//! - `div#game_title h1`: `Show #8045 - Monday, September 11, 2023`
//! - `p.contestants a`: one link per contestant, full name as link text
//! - first row of `td.score_player_nickname`: the on-air display names, seat
//!   order left to right (the reverse of the roster's listing order)
//!
//! Any of show number, date or roster missing is fatal for the episode.

use chrono::NaiveDate;

use crate::core::sanitize::{leading_number, normalize_ws};
use crate::core::{Document, Element};
use crate::error::ScrapeError;
use crate::model::Contestant;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub show_num: u32,
    pub date: NaiveDate,
    pub contestants: Vec<Contestant>,
}

pub fn extract(doc: &Document) -> Result<Metadata, ScrapeError> {
    let title = title_text(doc).ok_or(ScrapeError::MetadataMissing("title"))?;
    let (show_part, date_part) = split_title(&title);

    let show_num = show_part
        .and_then(|s| s.find('#').and_then(|i| leading_number(&s[i + 1..])))
        .ok_or(ScrapeError::MetadataMissing("show_num"))?;
    let date = date_part
        .and_then(parse_air_date)
        .ok_or(ScrapeError::MetadataMissing("date"))?;

    let mut contestants = roster(doc);
    if contestants.is_empty() {
        return Err(ScrapeError::MetadataMissing("contestants"));
    }
    attach_nicknames(doc, &mut contestants);

    logd!("Metadata: show #{show_num} on {date} with {} contestants", contestants.len());
    Ok(Metadata { show_num, date, contestants })
}

/// Air date alone, for work that needs it without waiting on the roster.
pub fn air_date(doc: &Document) -> Option<NaiveDate> {
    let title = title_text(doc)?;
    split_title(&title).1.and_then(parse_air_date)
}

fn title_text(doc: &Document) -> Option<String> {
    let from_header = doc
        .by_id("game_title")
        .and_then(|div| div.find_tag("h1").or(Some(div)))
        .map(|e| e.text());
    // Some saved pages lose the header div; the <title> carries the same text
    // after a site prefix ("J! Archive - Show #…").
    from_header
        .filter(|t| t.contains('#'))
        .or_else(|| doc.root().find_tag("title").map(|t| t.text()))
        .filter(|t| !t.is_empty())
}

/// `"… Show #8045 - Monday, September 11, 2023"` → (`"Show #8045"`, `"Monday, September 11, 2023"`)
fn split_title(title: &str) -> (Option<&str>, Option<&str>) {
    let Some(hash) = title.find('#') else { return (None, None) };
    let start = title[..hash].rfind("Show").unwrap_or(hash);
    let rest = &title[start..];
    match rest.find(" - ").or_else(|| rest.find(", aired")) {
        Some(i) => {
            let sep = if rest[i..].starts_with(" - ") { 3 } else { ", aired".len() };
            (Some(rest[..i].trim()), Some(rest[i + sep..].trim()))
        }
        None => (Some(rest.trim()), None),
    }
}

fn parse_air_date(s: &str) -> Option<NaiveDate> {
    let s = normalize_ws(s);
    const FORMATS: [&str; 3] = ["%A, %B %d, %Y", "%B %d, %Y", "%Y-%m-%d"];
    FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(&s, f).ok())
}

fn roster(doc: &Document) -> Vec<Contestant> {
    doc.root()
        .find_all_class("p", "contestants")
        .filter_map(|p| p.find_tag("a"))
        .map(|a| a.text())
        .filter(|name| !name.is_empty())
        .map(|name| Contestant::new(&name))
        .collect()
}

/// Pair scoreboard nicknames with roster entries. Skipped when the counts
/// disagree (e.g. a contestant withdrew mid-show), since pairing is positional.
fn attach_nicknames(doc: &Document, contestants: &mut [Contestant]) {
    let Some(first) = doc.root().find_class("td", "score_player_nickname") else { return };
    let Some(row) = first.parent() else { return };
    let nicks: Vec<String> = row
        .children()
        .filter(|td: &Element<'_>| td.has_class("score_player_nickname"))
        .map(|td| td.text())
        .collect();

    if nicks.len() != contestants.len() {
        logd!("Metadata: {} nicknames for {} contestants; not pairing", nicks.len(), contestants.len());
        return;
    }
    let n = contestants.len();
    for (i, nick) in nicks.iter().enumerate() {
        contestants[n - 1 - i].add_nickname(nick);
    }
}
