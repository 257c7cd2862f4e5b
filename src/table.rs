// src/table.rs

use anyhow::{bail, Result};
use std::collections::BTreeMap;

/// One cell of a [`YearTable`]. `None` marks a cell the page never provided.
pub type Cell = Option<String>;

/// All incident rows scraped for one calendar year.
///
/// Every row holds exactly one cell per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Year → table, in year order. Years become text only in file names and
/// reports.
pub type ScrapeResult = BTreeMap<i32, YearTable>;

impl YearTable {
    /// Concatenate rows from every table on a page under one column list.
    ///
    /// Rows narrower than `columns` are padded with `None`. Wider rows are
    /// rejected.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = columns.len();
        let mut out = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() > width {
                bail!(
                    "row {} has {} cells but the table only has {} columns",
                    i,
                    row.len(),
                    width
                );
            }
            let mut cells: Vec<Cell> = row.into_iter().map(Some).collect();
            cells.resize(width, None);
            out.push(cells);
        }
        Ok(Self { columns, rows: out })
    }

    /// Build from cells that may already contain gaps.
    pub fn from_cells(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.len() != columns.len())
        {
            bail!(
                "row {} has {} cells, expected {}",
                i,
                row.len(),
                columns.len()
            );
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first column called exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cells of column `name`, top to bottom.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = Option<&'a str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| r[idx].as_deref()))
    }

    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_deref()
    }
}
