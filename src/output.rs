// src/output.rs

use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{info, instrument};

use crate::table::{ScrapeResult, YearTable};

/// Write `table` to `<dir>/<year>.csv`, creating `dir` if needed and
/// overwriting any previous file.
///
/// The first column is a positional row index with an empty header.
/// Missing cells are written as empty fields.
#[instrument(level = "debug", skip(table, dir), fields(dir = %dir.as_ref().display(), rows = table.len()))]
pub fn write_year<P: AsRef<Path>>(table: &YearTable, dir: P, year: i32) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("creating {:?}", dir))?;
    let path = dir.join(format!("{}.csv", year));

    let mut wtr = WriterBuilder::new()
        .flexible(false)
        .from_path(&path)
        .with_context(|| format!("creating {:?}", path))?;

    let header = std::iter::once("").chain(table.columns().iter().map(String::as_str));
    wtr.write_record(header)
        .with_context(|| format!("writing header to {:?}", path))?;

    for (i, row) in table.rows().iter().enumerate() {
        let index = i.to_string();
        let record = std::iter::once(index.as_str())
            .chain(row.iter().map(|c| c.as_deref().unwrap_or("")));
        wtr.write_record(record)
            .with_context(|| format!("writing row {} to {:?}", i, path))?;
    }
    wtr.flush().with_context(|| format!("flushing {:?}", path))?;

    Ok(path)
}

/// Write every year in `data` under `dir`.
pub fn write_all<P: AsRef<Path>>(data: &ScrapeResult, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut written = Vec::with_capacity(data.len());
    for (year, table) in data {
        let path = write_year(table, dir, *year)?;
        info!(%year, path = %path.display(), rows = table.len(), "wrote csv");
        written.push(path);
    }
    Ok(written)
}

/// Read a file produced by [`write_year`] back into a table, dropping the
/// index column.
///
/// Every field comes back as a present cell, so an empty field reads as
/// `Some("")`. Padded (`None`) cells are the one thing that doesn't
/// survive the round trip.
pub fn read_year<P: AsRef<Path>>(path: P) -> Result<YearTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("opening {:?}", path))?;

    let columns: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {:?}", path))?
        .iter()
        .skip(1)
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading row {} of {:?}", i, path))?;
        rows.push(
            record
                .iter()
                .skip(1)
                .map(|f| Some(f.to_string()))
                .collect(),
        );
    }

    YearTable::from_cells(columns, rows).with_context(|| format!("loading {:?}", path))
}
