// src/cli.rs
use std::{fs, io, path::PathBuf};

use clap::Parser;
use color_eyre::eyre::{bail, Result, WrapErr};

use crate::{
    config::consts::BASE_URL,
    config::options::{AppOptions, EmptyCluePolicy, ExportFormat, ExportOptions, ScrapeOptions},
    core::net,
    file,
    progress::{Progress, Stage},
    scrape::{parse_document, scrape_episode},
    specs::dialect::Dialect,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape one J! Archive game into a flat clue/response table", long_about = None)]
pub struct Args {
    /// Archive game id (the `game_id=` query parameter)
    #[arg(short, long)]
    pub game_id: u32,

    /// Read a saved page instead of fetching it
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Markup era: modern, legacy, or auto to guess from the page
    #[arg(long, default_value = "auto")]
    pub dialect: String,

    #[arg(long, env = "JARCHIVE_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,

    /// Clues nobody answered: retain (one empty row) or omit
    #[arg(long, default_value = "retain")]
    pub empty_clues: String,

    /// Extract the boards and the final round on separate threads
    #[arg(long)]
    pub parallel: bool,

    /// csv, tsv or json
    #[arg(long, default_value = "csv")]
    pub format: String,

    #[arg(long)]
    pub no_headers: bool,

    /// Output file, or `-` for stdout. Defaults to out/episode_<game_id>.<ext>
    #[arg(short, long)]
    pub out: Option<String>,

    /// Print a one-line summary and the recorded warnings to stderr
    #[arg(long)]
    pub summary: bool,
}

impl Args {
    /// Options for everything but the dialect, which may need the page.
    fn to_options(&self) -> Result<AppOptions> {
        let mut scrape = ScrapeOptions::for_game(self.game_id);
        scrape.base_url = self.base_url.clone();
        scrape.empty_clues = self.empty_clues.parse::<EmptyCluePolicy>()?;
        scrape.parallel = self.parallel;

        let mut export = ExportOptions::for_game(self.game_id);
        export.format = self.format.parse::<ExportFormat>()?;
        export.include_headers = !self.no_headers;
        if let Some(out) = self.out.as_deref().filter(|o| *o != "-") {
            export.set_path(out);
        }
        Ok(AppOptions { scrape, export })
    }

    fn to_stdout(&self) -> bool {
        self.out.as_deref() == Some("-")
    }
}

/// Forwards stage progress to the log.
struct LogProgress;

impl Progress for LogProgress {
    fn log(&mut self, msg: &str) {
        logf!("{msg}");
    }
    fn stage_done(&mut self, stage: Stage, items: usize) {
        logd!("{stage}: {items}");
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let AppOptions { mut scrape, export } = args.to_options()?;

    let html = match &args.input {
        Some(path) => fs::read_to_string(path)
            .wrap_err_with(|| format!("reading {}", path.display()))?,
        None => {
            let url = net::episode_url(&scrape.base_url, scrape.game_id);
            logf!("Fetching {url}");
            net::http_get(&url)?
        }
    };

    let doc = parse_document(&html)?;
    scrape.dialect = match args.dialect.trim().to_ascii_lowercase().as_str() {
        "auto" => {
            let d = Dialect::detect(&doc);
            logd!("Detected {d} markup");
            d
        }
        other => other.parse::<Dialect>()?,
    };

    let output = scrape_episode(&doc, &scrape, Some(&mut LogProgress))?;
    if output.table.is_empty() {
        bail!("game {} produced no rows", scrape.game_id);
    }

    if args.to_stdout() {
        file::write_to(io::stdout().lock(), &export, &output.table)?;
    } else {
        let path = file::write_export(&export, &output.table)?;
        logf!("Saved {} rows to {}", output.table.len(), path.display());
    }

    if args.summary {
        eprintln!("{}", output.summary());
        for w in &output.report.warnings {
            eprintln!("  warning: {w}");
        }
    }
    Ok(())
}
