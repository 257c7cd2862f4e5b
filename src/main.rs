use anyhow::Result;
use phobia::{ScrapeConfig, WikiClient, WikiScraper};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Perpetrators printed on stdout, most frequent first.
const TOP_PERPETRATORS: usize = 25;

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!("startup");

    // ─── 2) configuration ───────────────────────────────────────────
    let config = ScrapeConfig::from_env()?;
    info!(
        start = config.start_year,
        stop = config.stop_year,
        save_csv = config.save_csv,
        csv_path = %config.csv_path.display(),
        "config"
    );

    // ─── 3) scrape every year ───────────────────────────────────────
    let client = WikiClient::new(&config)?;
    let scrape = WikiScraper::new(config, client).run()?;

    for (year, table) in &scrape.data {
        info!(%year, rows = table.len(), columns = table.columns().len(), "year");
    }

    // ─── 4) report the tally ────────────────────────────────────────
    let top: Vec<_> = scrape
        .perpetrators
        .most_common(TOP_PERPETRATORS)
        .into_iter()
        .map(|(name, count)| serde_json::json!({ "perpetrator": name, "count": count }))
        .collect();
    let report = serde_json::json!({
        "years": scrape.data.len(),
        "incidents": scrape.perpetrators.total(),
        "distinct_perpetrators": scrape.perpetrators.len(),
        "top": top,
        "written": scrape.written,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);

    info!("all done");
    Ok(())
}
