// src/file.rs

use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::assemble::EpisodeTable;
use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::write_table;
use crate::error::ScrapeError;

/// Write the table to `export.out_path()` in the chosen format.
/// Returns the final path written to.
pub fn write_export(export: &ExportOptions, table: &EpisodeTable) -> Result<PathBuf, ScrapeError> {
    let path = export.out_path();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }

    let mut out = BufWriter::new(File::create(&path)?);
    write_to(&mut out, export, table)?;
    out.flush()?;
    logd!("Wrote {} rows to {}", table.len(), path.display());
    Ok(path)
}

/// Format-dispatching writer shared by file export and stdout.
pub fn write_to<W: Write>(mut w: W, export: &ExportOptions, table: &EpisodeTable) -> Result<(), ScrapeError> {
    match (export.format, export.format.delim()) {
        (ExportFormat::Json, _) | (_, None) => {
            serde_json::to_writer_pretty(&mut w, &table.rows)?;
            writeln!(w)?;
        }
        (_, Some(sep)) => write_table(&mut w, table, export.include_headers, sep)?,
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
