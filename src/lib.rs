//! Scrape the yearly Wikipedia lists of terrorist incidents into per-year
//! tables, tally perpetrators across years and save each year as CSV.

pub mod clean;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod paths;
pub mod pipeline;
pub mod table;
pub mod tally;

pub use config::ScrapeConfig;
pub use extract::ExtractMode;
pub use fetch::{PageSource, WikiClient};
pub use pipeline::{Scrape, WikiScraper};
pub use table::{ScrapeResult, YearTable};
pub use tally::PerpetratorTally;
