// src/config/options.rs
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::consts::*;
use crate::error::ScrapeError;
use crate::specs::dialect::Dialect;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// What to do with clues nobody responded to (unrevealed, or revealed and
/// passed over in silence).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyCluePolicy {
    /// One row with null responder/outcome fields.
    #[default]
    Retain,
    /// No row at all.
    Omit,
}

impl FromStr for EmptyCluePolicy {
    type Err = ScrapeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "retain" | "keep" => Ok(Self::Retain),
            "omit" | "drop" => Ok(Self::Omit),
            other => Err(ScrapeError::InvalidOption(format!("empty-clue policy: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Markup era of the transcript.
    pub dialect: Dialect,
    /// Archive game id; stamped on every row and used to build the page URL.
    pub game_id: u32,
    pub base_url: String,
    pub empty_clues: EmptyCluePolicy,
    /// Run metadata/rounds/final extraction on scoped threads.
    pub parallel: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            game_id: 0,
            base_url: s!(BASE_URL),
            empty_clues: EmptyCluePolicy::default(),
            parallel: false,
        }
    }
}

impl ScrapeOptions {
    pub fn for_game(game_id: u32) -> Self {
        Self { game_id, ..Self::default() }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv", ExportFormat::Json => "json" }
    }
    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self { ExportFormat::Csv => Some(','), ExportFormat::Tsv => Some('\t'), ExportFormat::Json => None }
    }
}

impl FromStr for ExportFormat {
    type Err = ScrapeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            other => Err(ScrapeError::InvalidOption(format!("format: {other}"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_headers: bool,
    out_path: OutputPath,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            include_headers: true,
            out_path: OutputPath::default(),
        }
    }
}

impl ExportOptions {
    /// `<dir>/<stem>.<ext>`; the format picks the extension unless the user
    /// supplied one explicitly.
    pub fn out_path(&self) -> PathBuf {
        let mut path = self.out_path.dir.clone();
        let stem = self.out_path.file_stem.to_string_lossy();
        let ext = match &self.out_path.ext {
            Some(e) => e.to_string_lossy().into_owned(),
            None => s!(self.format.ext()),
        };
        path.push(format!("{stem}.{ext}"));
        path
    }

    /// Parse user text into dir + stem (+ explicit extension, if any).
    pub fn set_path(&mut self, text: &str) {
        let p = Path::new(text.trim());
        if let Some(parent) = p.parent() {
            self.out_path.dir = parent.to_path_buf();
        }
        if let Some(stem) = p.file_stem() {
            self.out_path.file_stem = stem.to_os_string();
        }
        self.out_path.ext = p.extension().map(|e| e.to_os_string());
    }

    /// Default file name for one episode: `out/episode_<game_id>.<ext>`.
    pub fn for_game(game_id: u32) -> Self {
        let mut opts = Self::default();
        opts.out_path.file_stem = OsString::from(format!("{DEFAULT_FILE_STEM}_{game_id}"));
        opts
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPath {
    dir: PathBuf,
    file_stem: OsString, // without extension
    ext: Option<OsString>,
}

impl Default for OutputPath {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: OsString::from(DEFAULT_FILE_STEM),
            ext: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_follows_format() {
        let mut opts = ExportOptions::for_game(7000);
        assert!(opts.out_path().to_string_lossy().ends_with("episode_7000.csv"));
        opts.format = ExportFormat::Json;
        assert!(opts.out_path().to_string_lossy().ends_with("episode_7000.json"));
    }

    #[test]
    fn user_extension_survives_format_change() {
        let mut opts = ExportOptions::default();
        opts.set_path("data/games/hello.txt");
        opts.format = ExportFormat::Tsv;
        let out = opts.out_path();
        assert!(out.to_string_lossy().ends_with("hello.txt"));
        assert!(out.starts_with("data/games"));
    }

    #[test]
    fn policy_and_format_parse() {
        assert_eq!("omit".parse::<EmptyCluePolicy>().unwrap(), EmptyCluePolicy::Omit);
        assert_eq!(" Retain ".parse::<EmptyCluePolicy>().unwrap(), EmptyCluePolicy::Retain);
        assert!("sometimes".parse::<EmptyCluePolicy>().is_err());
        assert_eq!("TSV".parse::<ExportFormat>().unwrap(), ExportFormat::Tsv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
