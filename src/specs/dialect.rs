// src/specs/dialect.rs
//! Markup eras of the game page.
//!
//! The archive has shown clue responses two ways over the years:
//! - **modern**: a hidden sibling cell `td#clue_<loc>_r` inside the clue cell;
//! - **legacy**: HTML packed into the `onmouseover="toggle(...)"` handler of a
//!   `div` in the clue cell (third string argument, entity-encoded).
//!
//! Everything else (board layout, headers, prompt cells) is shared, so the
//! trait's default methods carry it and each dialect overrides only where the
//! response lives.

use std::fmt;
use std::str::FromStr;

use super::response::{self, ResponseBlock};
use crate::core::sanitize::js_string_args;
use crate::core::{Document, Element};
use crate::error::ScrapeError;

pub trait MarkupRules: Sync {
    fn name(&self) -> &'static str;

    /// The prompt cell: `td.clue_text` whose id is not a response id.
    fn prompt_cell<'a>(&self, cell: Element<'a>) -> Option<Element<'a>> {
        cell.find_all_class("td", "clue_text")
            .find(|td| !td.attr("id").is_some_and(|id| id.ends_with("_r")))
    }

    /// Board coordinate (`J_2_3`, `FJ`) from the prompt cell's `clue_<loc>` id.
    fn clue_location(&self, cell: Element<'_>) -> Option<String> {
        self.prompt_cell(cell)
            .and_then(|td| td.attr("id"))
            .and_then(|id| id.strip_prefix("clue_"))
            .filter(|loc| !loc.is_empty())
            .map(|loc| s!(loc))
    }

    /// Response block of a regular clue cell.
    fn response(&self, doc: &Document, cell: Element<'_>, location: &str) -> Option<ResponseBlock>;

    /// Response block of the final round, wagers included.
    fn final_response(&self, doc: &Document, region: Element<'_>) -> Option<ResponseBlock>;
}

pub struct ModernRules;

impl ModernRules {
    fn response_cell<'a>(doc: &'a Document, scope: Element<'a>, location: &str) -> Option<Element<'a>> {
        let want = format!("clue_{location}_r");
        scope
            .descendants()
            .find(|e| e.attr("id") == Some(want.as_str()))
            .or_else(|| doc.by_id(&want))
    }
}

impl MarkupRules for ModernRules {
    fn name(&self) -> &'static str { "modern" }

    fn response(&self, doc: &Document, cell: Element<'_>, location: &str) -> Option<ResponseBlock> {
        Self::response_cell(doc, cell, location).map(|td| response::read(td, false))
    }

    fn final_response(&self, doc: &Document, region: Element<'_>) -> Option<ResponseBlock> {
        Self::response_cell(doc, region, "FJ").map(|td| response::read(td, true))
    }
}

pub struct LegacyRules;

impl LegacyRules {
    /// `(first_arg, third_arg)` of the first `toggle(...)` mouseover under `scope`.
    fn toggle_args(scope: Element<'_>) -> Option<(String, String)> {
        scope.descendants().find_map(|e| {
            let handler = e.attr("onmouseover")?;
            let mut args = js_string_args(handler).into_iter();
            let target = args.next()?;
            let html = args.nth(1)?;
            Some((target, html))
        })
    }

    fn parse_fragment(html: &str, with_wagers: bool) -> ResponseBlock {
        let frag = Document::parse(html);
        response::read(frag.root(), with_wagers)
    }
}

impl MarkupRules for LegacyRules {
    fn name(&self) -> &'static str { "legacy" }

    fn clue_location(&self, cell: Element<'_>) -> Option<String> {
        let from_prompt = self
            .prompt_cell(cell)
            .and_then(|td| td.attr("id"))
            .and_then(|id| id.strip_prefix("clue_"))
            .filter(|loc| !loc.is_empty())
            .map(|loc| s!(loc));
        from_prompt.or_else(|| {
            Self::toggle_args(cell).and_then(|(target, _)| target.strip_prefix("clue_").map(|l| s!(l)))
        })
    }

    fn response(&self, _doc: &Document, cell: Element<'_>, _location: &str) -> Option<ResponseBlock> {
        Self::toggle_args(cell).map(|(_, html)| Self::parse_fragment(&html, false))
    }

    fn final_response(&self, _doc: &Document, region: Element<'_>) -> Option<ResponseBlock> {
        Self::toggle_args(region).map(|(_, html)| Self::parse_fragment(&html, true))
    }
}

/// Selector for [`MarkupRules`]; parsed from `"modern"` / `"legacy"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dialect {
    #[default]
    Modern,
    Legacy,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Modern, Dialect::Legacy];

    pub fn rules(self) -> &'static dyn MarkupRules {
        match self {
            Dialect::Modern => &ModernRules,
            Dialect::Legacy => &LegacyRules,
        }
    }

    /// Guess the era from the page itself: hidden `_r` response cells mean
    /// modern, `toggle(...)` mouseovers mean legacy. Defaults to modern.
    pub fn detect(doc: &Document) -> Dialect {
        for e in doc.root().descendants() {
            if e.is("td") && e.attr("id").is_some_and(|id| id.starts_with("clue_") && id.ends_with("_r")) {
                return Dialect::Modern;
            }
            if e.attr("onmouseover").is_some_and(|h| h.contains("toggle(")) {
                return Dialect::Legacy;
            }
        }
        Dialect::Modern
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rules().name())
    }
}

impl FromStr for Dialect {
    type Err = ScrapeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let want = s.trim().to_ascii_lowercase();
        Dialect::ALL
            .into_iter()
            .find(|d| d.rules().name() == want)
            .ok_or_else(|| ScrapeError::UnknownDialect(s!(s)))
    }
}
