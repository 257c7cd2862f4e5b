// src/pipeline.rs

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::{
    config::ScrapeConfig,
    extract::extract_tables,
    fetch::PageSource,
    output, paths,
    table::{ScrapeResult, YearTable},
    tally::PerpetratorTally,
};

/// Outputs of one completed run.
#[derive(Debug, Clone, Default)]
pub struct Scrape {
    pub data: ScrapeResult,
    pub perpetrators: PerpetratorTally,
    /// CSV files written, in year order. Empty when saving is off.
    pub written: Vec<PathBuf>,
}

/// Fetch, extract, tally and save the yearly incident lists.
///
/// Runs strictly one year after another; the first error aborts the run and
/// nothing already scraped is saved.
pub struct WikiScraper<S> {
    config: ScrapeConfig,
    source: S,
}

impl<S: PageSource> WikiScraper<S> {
    pub fn new(config: ScrapeConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch one year's page and aggregate all of its tables.
    #[instrument(level = "info", skip(self))]
    pub fn scrape_year(&self, year: i32) -> Result<YearTable> {
        let html = self
            .source
            .fetch_page(year)
            .with_context(|| format!("fetching page for {}", year))?;
        let page = extract_tables(&html, self.config.extract_mode)
            .with_context(|| format!("extracting tables for {}", year))?;
        let dropped = page.dropped_cells();
        if dropped > 0 {
            debug!(year, dropped, "cells did not fit a full row");
        }
        let tables = page.tables.len();
        let table = page
            .into_table()
            .with_context(|| format!("aggregating tables for {}", year))?;
        info!(
            year,
            tables,
            columns = table.columns().len(),
            rows = table.len(),
            "scraped"
        );
        Ok(table)
    }

    pub fn run(&self) -> Result<Scrape> {
        self.config.validate()?;
        let started = Instant::now();

        let mut data = ScrapeResult::new();
        for year in self.config.years() {
            data.insert(year, self.scrape_year(year)?);
        }

        let perpetrators = PerpetratorTally::from_result(&data);
        info!(
            years = data.len(),
            perpetrators = perpetrators.len(),
            incidents = perpetrators.total(),
            "tallied perpetrators"
        );

        let written = if self.config.save_csv {
            let dir = paths::resolve(&self.config.csv_path)?;
            output::write_all(&data, &dir)?
        } else {
            Vec::new()
        };

        info!(elapsed = ?started.elapsed(), files = written.len(), "run complete");
        Ok(Scrape {
            data,
            perpetrators,
            written,
        })
    }
}
