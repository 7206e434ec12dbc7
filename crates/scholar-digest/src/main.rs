//! Scholar Digest - Entry Point
//!
//! One run per invocation; schedule it externally (cron, CI).

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use scholar_digest::{Config, Digest};

#[derive(Parser, Debug)]
#[command(name = "scholar-digest")]
#[command(about = "Append new Google Scholar papers to a markdown report")]
#[command(version)]
struct Cli {
    /// SerpApi key (required)
    #[arg(long, env = "SERPAPI_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Search query (defaults to the tracked optimizer topics)
    #[arg(long, short)]
    query: Option<String>,

    /// Earliest publication year (default: two years ago)
    #[arg(long)]
    year_low: Option<i32>,

    /// Latest publication year (default: this year)
    #[arg(long)]
    year_high: Option<i32>,

    /// Result-count hint sent to the search provider
    #[arg(long)]
    num: Option<u32>,

    /// Interface language hint
    #[arg(long)]
    language: Option<String>,

    /// Markdown report to update (default: papers.md)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Translate abstracts into this language (e.g. zh-CN)
    #[arg(long, env = "TRANSLATE_TO")]
    translate_to: Option<String>,

    /// Fetch and filter, but do not write the report
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(Config, bool)> {
        let mut config = Config::new(self.api_key)?;

        if let Some(output) = self.output {
            config = config.with_report_path(output);
        }

        if let Some(query) = self.query {
            config = config.with_query(query);
        }
        let low = self.year_low.unwrap_or(config.year_low);
        let high = self.year_high.unwrap_or(config.year_high);
        config = config.with_years(low, high);
        if let Some(num) = self.num {
            config.num_results = num;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        if let Some(target) = self.translate_to.filter(|t| !t.is_empty()) {
            config = config.with_translation(target);
        }

        config.validate()?;
        Ok((config, self.dry_run))
    }
}

fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if json {
        subscriber.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        subscriber.with(tracing_subscriber::fmt::layer().compact()).init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_tracing(&cli.log_level, cli.json_logs);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting scholar digest");

    let (config, dry_run) = match cli.into_config() {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e);
        }
    };

    let digest = Digest::new(config)?.dry_run(dry_run);
    let summary = digest.run().await?;

    if summary.written > 0 {
        tracing::info!(
            written = summary.written,
            path = %digest.config().report_path.display(),
            "New papers added"
        );
    } else {
        tracing::info!(fetched = summary.fetched, accepted = summary.accepted, "No report changes");
    }

    Ok(())
}
