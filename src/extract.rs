// src/extract.rs

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, trace, warn};

use crate::clean::clean_element;
use crate::table::YearTable;

/// Class names a `<table>` must carry to be scraped.
pub const TABLE_CLASSES: &[&str] = &["wikitable"];

static TABLES: Lazy<Selector> = Lazy::new(|| {
    let css = TABLE_CLASSES
        .iter()
        .map(|c| format!("table.{}", c))
        .collect::<Vec<_>>()
        .join(", ");
    Selector::parse(&css).expect("table selector should parse")
});
static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("th selector should parse"));
static CONTENTS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("td selector should parse"));

/// What to do when a table's content cells don't fill a whole number of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtractMode {
    /// Drop the trailing partial row and log it.
    #[default]
    Lenient,
    /// Refuse the page.
    Strict,
}

/// Cell counts for one scraped `<table>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub headers: usize,
    pub contents: usize,
    pub rows: usize,
    pub dropped_cells: usize,
}

/// Everything pulled out of one page, before aggregation.
#[derive(Debug, Clone, Default)]
pub struct PageExtract {
    pub tables: Vec<TableSummary>,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl PageExtract {
    pub fn dropped_cells(&self) -> usize {
        self.tables.iter().map(|t| t.dropped_cells).sum()
    }

    pub fn into_table(self) -> Result<YearTable> {
        YearTable::from_rows(self.columns, self.rows)
    }
}

/// Pull every wikitable on the page into positional rows.
///
/// Content cells are paired with header cells row-major:
/// cell `(r, h)` is `td[r * headers + h]`. Row or column spans break
/// that layout silently; a table with no `th` at all is an error.
#[instrument(level = "debug", skip(html), fields(html_len = html.len()))]
pub fn extract_tables(html: &str, mode: ExtractMode) -> Result<PageExtract> {
    let doc = Html::parse_document(html);
    let mut out = PageExtract::default();

    for (n, table) in doc.select(&TABLES).enumerate() {
        let headings: Vec<ElementRef<'_>> = table.select(&HEADINGS).collect();
        let contents: Vec<ElementRef<'_>> = table.select(&CONTENTS).collect();
        let h = headings.len();
        if h == 0 {
            bail!(
                "table {} has {} content cells but no header cells",
                n,
                contents.len()
            );
        }

        let rows = contents.len() / h;
        let dropped = contents.len() % h;
        if dropped > 0 {
            match mode {
                ExtractMode::Strict => bail!(
                    "table {}: {} content cells do not fill rows of {} headers ({} left over)",
                    n,
                    contents.len(),
                    h,
                    dropped
                ),
                ExtractMode::Lenient => warn!(
                    table = n,
                    headers = h,
                    contents = contents.len(),
                    dropped,
                    "dropping trailing partial row"
                ),
            }
        }

        if rows > 0 && out.columns.len() < h {
            let missing = h - out.columns.len();
            out.columns
                .extend(headings[..missing].iter().map(|el| clean_element(*el)));
            trace!(table = n, columns = ?out.columns, "captured headers");
        }

        for r in 0..rows {
            let row = contents[r * h..(r + 1) * h]
                .iter()
                .map(|el| clean_element(*el))
                .collect();
            out.rows.push(row);
        }

        debug!(table = n, headers = h, rows, "extracted table");
        out.tables.push(TableSummary {
            headers: h,
            contents: contents.len(),
            rows,
            dropped_cells: dropped,
        });
    }

    Ok(out)
}
