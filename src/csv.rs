// src/csv.rs
use std::io::{self, Write};

use crate::assemble::EpisodeTable;

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Stream the whole table, header line first when asked for.
pub fn write_table<W: Write>(mut w: W, table: &EpisodeTable, include_headers: bool, sep: char) -> io::Result<()> {
    if include_headers {
        write_row(&mut w, &EpisodeTable::headers(), sep)?;
    }
    for rec in table.records() {
        write_row(&mut w, &rec, sep)?;
    }
    Ok(())
}

/// Whole-table export string (clipboard, stdout).
pub fn to_export_string(table: &EpisodeTable, include_headers: bool, sep: char) -> String {
    let mut buf: Vec<u8> = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_table(&mut buf, table, include_headers, sep);

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}
