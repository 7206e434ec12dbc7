//! One digest run: fetch, filter, translate, merge.

use crate::client::{ScholarClient, SearchParams};
use crate::config::Config;
use crate::error::{ClientResult, ReportResult};
use crate::formatters::ReportHeader;
use crate::report::Report;
use crate::translate::{self, Translator};

/// Counts from one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Candidates returned by the search provider.
    pub fetched: usize,
    /// Candidates that passed validation and deduplication.
    pub accepted: usize,
    /// Rows written to the report.
    pub written: usize,
}

/// The digest pipeline, built from a validated [`Config`].
pub struct Digest {
    config: Config,
    client: ScholarClient,
    translator: Box<dyn Translator>,
    dry_run: bool,
}

impl Digest {
    /// Build the pipeline, choosing the translator the configuration asks for.
    pub fn new(config: Config) -> ClientResult<Self> {
        let client = ScholarClient::new(&config)?;
        let translator = translate::from_config(&config)?;
        Ok(Self::with_parts(config, client, translator))
    }

    /// Build the pipeline from explicit collaborators.
    #[must_use]
    pub fn with_parts(config: Config, client: ScholarClient, translator: Box<dyn Translator>) -> Self {
        Self { config, client, translator, dry_run: false }
    }

    /// Fetch and filter but never write the report.
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Run once.
    ///
    /// Search failures are logged and count as zero results. Only report I/O
    /// errors are returned.
    pub async fn run(&self) -> ReportResult<RunSummary> {
        let mut report = Report::open(&self.config.report_path)?;

        let params = SearchParams::from_config(&self.config);
        tracing::info!(query = %params.query, "Searching");

        let candidates = match self.client.search(&params).await {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(error = %e, "Search request failed");
                Vec::new()
            }
        };

        let mut summary = RunSummary { fetched: candidates.len(), ..RunSummary::default() };
        if candidates.is_empty() {
            tracing::info!("No results returned");
            return Ok(summary);
        }

        let mut records = report.select(&candidates);
        summary.accepted = records.len();
        if records.is_empty() {
            tracing::info!(fetched = summary.fetched, "Nothing new to add");
            return Ok(summary);
        }

        if self.dry_run {
            for record in &records {
                tracing::info!(title = %record.title, link = %record.link, "Would add");
            }
            return Ok(summary);
        }

        for record in &mut records {
            record.translated_snippet = self.translator.translate(&record.snippet).await;
        }

        let header =
            ReportHeader::now(&self.config.query, self.config.year_low, self.config.year_high);
        summary.written = report.write(&records, &header)?;

        tracing::info!(
            fetched = summary.fetched,
            written = summary.written,
            total = report.row_count(),
            "Digest complete"
        );
        Ok(summary)
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Digest")
            .field("config", &self.config)
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}
