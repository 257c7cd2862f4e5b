// src/config.rs

use anyhow::{bail, Context, Result};
use std::{env, ops::RangeInclusive, path::PathBuf, str::FromStr, time::Duration};

use crate::extract::ExtractMode;

pub const DEFAULT_URL_PREFIX: &str =
    "https://en.wikipedia.org/wiki/List_of_terrorist_incidents_in_";
pub const DEFAULT_START_YEAR: i32 = 1999;
pub const DEFAULT_STOP_YEAR: i32 = 2019;
pub const DEFAULT_CSV_PATH: &str = "csv_data";

/// Everything a scrape run needs, passed explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub start_year: i32,
    /// Inclusive.
    pub stop_year: i32,
    pub save_csv: bool,
    /// Relative paths are resolved against the working directory.
    pub csv_path: PathBuf,
    pub url_prefix: String,
    pub extract_mode: ExtractMode,
    /// No timeout when unset.
    pub request_timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            stop_year: DEFAULT_STOP_YEAR,
            save_csv: true,
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            extract_mode: ExtractMode::Lenient,
            request_timeout: None,
            user_agent: None,
        }
    }
}

impl ScrapeConfig {
    pub fn with_years(mut self, start_year: i32, stop_year: i32) -> Self {
        self.start_year = start_year;
        self.stop_year = stop_year;
        self
    }

    pub fn with_save_csv(mut self, save_csv: bool) -> Self {
        self.save_csv = save_csv;
        self
    }

    pub fn with_csv_path(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = csv_path.into();
        self
    }

    pub fn with_url_prefix(mut self, url_prefix: impl Into<String>) -> Self {
        self.url_prefix = url_prefix.into();
        self
    }

    pub fn with_extract_mode(mut self, mode: ExtractMode) -> Self {
        self.extract_mode = mode;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.stop_year
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_year > self.stop_year {
            bail!(
                "start year {} is after stop year {}",
                self.start_year,
                self.stop_year
            );
        }
        Ok(())
    }

    /// Defaults overridden by `PHOBIA_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = parse_var(&get, "PHOBIA_START_YEAR")? {
            cfg.start_year = v;
        }
        if let Some(v) = parse_var(&get, "PHOBIA_STOP_YEAR")? {
            cfg.stop_year = v;
        }
        if let Some(v) = get("PHOBIA_SAVE_CSV") {
            cfg.save_csv = parse_flag("PHOBIA_SAVE_CSV", &v)?;
        }
        if let Some(v) = get("PHOBIA_CSV_PATH") {
            cfg.csv_path = PathBuf::from(v);
        }
        if let Some(v) = get("PHOBIA_URL_PREFIX") {
            cfg.url_prefix = v;
        }
        if let Some(v) = get("PHOBIA_STRICT") {
            if parse_flag("PHOBIA_STRICT", &v)? {
                cfg.extract_mode = ExtractMode::Strict;
            }
        }
        let timeout: Option<u64> = parse_var(&get, "PHOBIA_TIMEOUT_SECS")?;
        if let Some(secs) = timeout {
            cfg.request_timeout = Some(Duration::from_secs(secs));
        }
        if let Some(v) = get("PHOBIA_USER_AGENT") {
            cfg.user_agent = Some(v);
        }
        Ok(cfg)
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .with_context(|| format!("parsing {}={:?}", key, raw))
        })
        .transpose()
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_match_the_wiki_range() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.years(), 1999..=2019);
        assert!(cfg.save_csv);
        assert_eq!(cfg.csv_path, PathBuf::from("csv_data"));
        assert_eq!(cfg.request_timeout, None);
        assert_eq!(cfg.extract_mode, ExtractMode::Lenient);
        cfg.validate().unwrap();
    }

    #[test]
    fn env_overrides() {
        let cfg = ScrapeConfig::from_lookup(lookup(&[
            ("PHOBIA_START_YEAR", "2010"),
            ("PHOBIA_STOP_YEAR", " 2012 "),
            ("PHOBIA_SAVE_CSV", "false"),
            ("PHOBIA_CSV_PATH", "/tmp/out"),
            ("PHOBIA_STRICT", "yes"),
            ("PHOBIA_TIMEOUT_SECS", "30"),
        ]))
        .unwrap();
        assert_eq!(cfg.years(), 2010..=2012);
        assert!(!cfg.save_csv);
        assert_eq!(cfg.csv_path, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.extract_mode, ExtractMode::Strict);
        assert_eq!(cfg.request_timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.url_prefix, DEFAULT_URL_PREFIX);
    }

    #[test]
    fn bad_env_values_are_errors() {
        let err = ScrapeConfig::from_lookup(lookup(&[("PHOBIA_START_YEAR", "nineteen")]))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("PHOBIA_START_YEAR"));
        assert!(ScrapeConfig::from_lookup(lookup(&[("PHOBIA_SAVE_CSV", "maybe")])).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let cfg = ScrapeConfig::default().with_years(2020, 2019);
        assert!(cfg.validate().is_err());
        ScrapeConfig::default().with_years(2005, 2005).validate().unwrap();
    }
}
