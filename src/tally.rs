// src/tally.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::table::ScrapeResult;

/// Column names checked, in order, for perpetrator text.
pub const PERPETRATOR_COLUMNS: &[&str] = &["Perpetrator", "Perpetrators"];

/// Perpetrator text → number of incidents, across every scraped year.
///
/// Keys are the raw cleaned cell text. "ISIS" and "ISIS and Boko Haram" are
/// different perpetrators here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PerpetratorTally(BTreeMap<String, usize>);

impl PerpetratorTally {
    #[instrument(level = "debug", skip(data), fields(years = data.len()))]
    pub fn from_result(data: &ScrapeResult) -> Self {
        let mut counts = BTreeMap::new();
        for (year, table) in data {
            let Some(values) = PERPETRATOR_COLUMNS
                .iter()
                .find_map(|name| table.column_values(name))
            else {
                debug!(%year, "no perpetrator column");
                continue;
            };
            for name in values.flatten() {
                *counts.entry(name.to_string()).or_insert(0) += 1;
            }
        }
        Self(counts)
    }

    pub fn get(&self, name: &str) -> usize {
        self.0.get(name).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Total incidents counted.
    pub fn total(&self) -> usize {
        self.0.values().sum()
    }

    /// The `n` most frequent perpetrators, highest first, ties by name.
    pub fn most_common(&self, n: usize) -> Vec<(&str, usize)> {
        let mut all: Vec<_> = self.iter().collect();
        all.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        all.truncate(n);
        all
    }

    pub fn as_map(&self) -> &BTreeMap<String, usize> {
        &self.0
    }
}
