// src/scrape.rs
use std::panic::resume_unwind;
use std::thread;

use crate::{
    assemble::{assemble, EpisodeTable},
    config::options::ScrapeOptions,
    core::Document,
    error::ScrapeError,
    expand::expand,
    identity::resolve_identities,
    model::{Clue, Episode},
    progress::{Progress, Stage},
    specs::{self, dialect::Dialect, metadata::Metadata, Extraction},
};

/// Recoverable problems met while scraping one episode.
#[derive(Debug, Default)]
pub struct ScrapeReport {
    pub dialect: Dialect,
    /// Every recoverable error, in the order it was recorded.
    pub warnings: Vec<ScrapeError>,
    /// Clue cells dropped as malformed.
    pub skipped_clues: usize,
    /// Display names no contestant matched.
    pub unresolved: Vec<String>,
    pub final_round_missing: bool,
}

impl ScrapeReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[derive(Debug)]
pub struct ScrapeOutput {
    pub episode: Episode,
    pub clues: Vec<Clue>,
    pub table: EpisodeTable,
    pub report: ScrapeReport,
}

impl ScrapeOutput {
    /// One line for humans: show, date, counts, problems.
    pub fn summary(&self) -> String {
        let r = &self.report;
        format!(
            "Show #{} ({}): {} clues, {} rows, {} contestants; {} skipped, {} unresolved{}",
            self.episode.show_num,
            self.episode.date,
            self.clues.len(),
            self.table.len(),
            self.episode.contestants.len(),
            r.skipped_clues,
            r.unresolved.len(),
            if r.final_round_missing { ", no final round" } else { "" },
        )
    }
}

/// Parse a page, refusing input with no markup at all.
pub fn parse_document(html: &str) -> Result<Document, ScrapeError> {
    if html.trim().is_empty() {
        return Err(ScrapeError::EmptyDocument);
    }
    let doc = Document::parse(html);
    if doc.element_count() == 0 {
        return Err(ScrapeError::EmptyDocument);
    }
    Ok(doc)
}

/// Convenience: [`parse_document`] then [`scrape_episode`].
pub fn scrape_html(
    html: &str,
    opts: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<ScrapeOutput, ScrapeError> {
    let doc = parse_document(html)?;
    scrape_episode(&doc, opts, progress)
}

/// Turn one parsed transcript into the episode table.
///
/// Only missing metadata is fatal. Malformed clues, a missing final round and
/// unknown display names end up in the report.
pub fn scrape_episode(
    doc: &Document,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeOutput, ScrapeError> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(Stage::ALL.len());
        p.log(&format!("Scraping game {} ({} markup)", opts.game_id, opts.dialect));
    }
    let result = run_stages(doc, opts, &mut progress);
    if let Err(e) = &result {
        loge!("Game {}: {e}", opts.game_id);
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

fn run_stages(
    doc: &Document,
    opts: &ScrapeOptions,
    progress: &mut Option<&mut dyn Progress>,
) -> Result<ScrapeOutput, ScrapeError> {
    let mut done = |stage: Stage, items: usize| {
        logd!("Stage {stage} done: {items}");
        if let Some(p) = progress.as_deref_mut() {
            p.stage_done(stage, items);
        }
    };

    let (meta, rounds, fin) = if opts.parallel {
        extract_parallel(doc, opts.dialect)
    } else {
        let meta = specs::metadata::extract(doc)?;
        let rounds = specs::rounds::extract(doc, meta.date, opts.dialect);
        let fin = specs::final_round::extract(doc, meta.date, opts.dialect);
        (Ok(meta), rounds, fin)
    };
    let meta = meta?;
    done(Stage::Metadata, meta.contestants.len());

    let mut report = ScrapeReport { dialect: opts.dialect, ..ScrapeReport::default() };

    let Extraction { value: round_clues, warnings } = rounds;
    report.skipped_clues = warnings
        .iter()
        .filter(|w| matches!(w, ScrapeError::MalformedClue { .. }))
        .count();
    report.warnings.extend(warnings);
    done(Stage::Rounds, round_clues.len());

    let final_clue = match fin {
        Ok(Extraction { value, warnings }) => {
            report.warnings.extend(warnings);
            Some(value)
        }
        Err(ScrapeError::FinalRoundMissing) => {
            logw!("Game {}: no final round on the page", opts.game_id);
            report.final_round_missing = true;
            report.warnings.push(ScrapeError::FinalRoundMissing);
            None
        }
        Err(e) => return Err(e),
    };
    done(Stage::FinalRound, usize::from(final_clue.is_some()));

    let round_rows = expand(&round_clues, opts.empty_clues);
    let final_rows = match &final_clue {
        Some(c) => expand(std::slice::from_ref(c), opts.empty_clues),
        None => Vec::new(),
    };

    let observed: Vec<&str> = round_rows
        .iter()
        .chain(&final_rows)
        .filter_map(|r| r.responder.as_deref())
        .collect();
    let resolution = resolve_identities(&meta.contestants, observed.as_slice());
    for name in &resolution.unresolved {
        let err = ScrapeError::UnresolvedName(name.clone());
        logw!("{err}");
        report.warnings.push(err);
    }
    report.unresolved = resolution.unresolved;
    done(Stage::Identities, resolution.map.len());

    let episode = Episode {
        show_num: meta.show_num,
        game_id: opts.game_id,
        date: meta.date,
        contestants: meta.contestants,
    };
    let table = assemble(&episode, round_rows, final_rows, &resolution.map);
    done(Stage::Assemble, table.len());

    let mut clues = round_clues;
    clues.extend(final_clue);

    logf!(
        "Show #{}: {} clues, {} rows, {} warnings",
        episode.show_num, clues.len(), table.len(), report.warnings.len()
    );
    Ok(ScrapeOutput { episode, clues, table, report })
}

type Extracted = (
    Result<Metadata, ScrapeError>,
    Extraction<Vec<Clue>>,
    Result<Extraction<Clue>, ScrapeError>,
);

/// Metadata, boards and final on their own scoped threads, joined in that
/// order. The board threads read the air date themselves; if it is missing the
/// metadata result carries the fatal error and theirs are discarded.
fn extract_parallel(doc: &Document, dialect: Dialect) -> Extracted {
    thread::scope(|s| {
        let meta = s.spawn(|| specs::metadata::extract(doc));
        let rounds = s.spawn(|| {
            specs::metadata::air_date(doc)
                .map(|date| specs::rounds::extract(doc, date, dialect))
                .unwrap_or_else(|| Extraction::new(Vec::new()))
        });
        let fin = s.spawn(|| {
            specs::metadata::air_date(doc)
                .ok_or(ScrapeError::MetadataMissing("date"))
                .and_then(|date| specs::final_round::extract(doc, date, dialect))
        });
        let meta = meta.join().unwrap_or_else(|e| resume_unwind(e));
        let rounds = rounds.join().unwrap_or_else(|e| resume_unwind(e));
        let fin = fin.join().unwrap_or_else(|e| resume_unwind(e));
        (meta, rounds, fin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::Progress;

    #[derive(Default)]
    struct Recorder {
        stages: Vec<Stage>,
        finished: bool,
    }

    impl Progress for Recorder {
        fn stage_done(&mut self, stage: Stage, _items: usize) {
            self.stages.push(stage);
        }
        fn finish(&mut self) {
            self.finished = true;
        }
    }

    const PAGE: &str = r#"
        <div id="game_title"><h1>Show #100 - Friday, May 5, 2000</h1></div>
        <p class="contestants"><a>Amy Lee</a>, a nurse</p>
        <p class="contestants"><a>Ben Stone</a>, a chef</p>
        <div id="jeopardy_round"><table class="round">
          <tr><td class="category"><table><tr><td class="category_name">ONE</td></tr></table></td></tr>
          <tr><td class="clue"><table>
            <tr><td><table class="clue_header"><tr><td class="clue_value">$100</td><td class="clue_order_number">1</td></tr></table></td></tr>
            <tr><td id="clue_J_1_1" class="clue_text">Prompt</td></tr>
            <tr><td id="clue_J_1_1_r" class="clue_text"><em class="correct_response">Resp</em><table><tr><td class="wrong">Zed</td><td class="right">Amy</td></tr></table></td></tr>
          </table></td></tr>
        </table></div>
    "#;

    #[test]
    fn empty_input_is_fatal() {
        let opts = ScrapeOptions::default();
        assert!(matches!(scrape_html("   ", &opts, None), Err(ScrapeError::EmptyDocument)));
        assert!(matches!(scrape_html("just text", &opts, None), Err(ScrapeError::EmptyDocument)));
    }

    #[test]
    fn missing_final_and_unknown_names_are_reported() {
        let mut rec = Recorder::default();
        let out = scrape_html(PAGE, &ScrapeOptions::for_game(42), Some(&mut rec)).unwrap();
        assert!(out.report.final_round_missing);
        assert_eq!(out.report.unresolved, vec![s!("Zed")]);
        assert_eq!(out.table.len(), 2);
        assert!(out.table.rows.iter().all(|r| r.game_id == 42 && r.show_num == 100));
        assert_eq!(out.table.rows[1].name.as_deref(), Some("Amy Lee"));
        assert_eq!(rec.stages, Stage::ALL.to_vec());
        assert!(rec.finished);
        assert!(out.summary().contains("no final round"));
    }

    #[test]
    fn missing_board_table_is_not_counted_as_skipped() {
        let page = PAGE.replace(r#"<table class="round">"#, r#"<table class="archived">"#);
        let out = scrape_html(&page, &ScrapeOptions::default(), None).unwrap();
        assert_eq!(out.report.skipped_clues, 0);
        assert!(out.report.warnings.iter().any(|w| matches!(w, ScrapeError::BoardMissing("J"))));
        assert!(out.clues.is_empty());
    }

    #[test]
    fn progress_finishes_on_fatal_error() {
        let mut rec = Recorder::default();
        let doc = Document::parse("<p>nothing here</p>");
        let res = scrape_episode(&doc, &ScrapeOptions::default(), Some(&mut rec));
        assert!(matches!(res, Err(ScrapeError::MetadataMissing(_))));
        assert!(rec.stages.is_empty());
        assert!(rec.finished);
    }
}
