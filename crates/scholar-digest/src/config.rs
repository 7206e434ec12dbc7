//! Configuration for the scholar digest.

use std::path::PathBuf;
use std::time::Duration;

use chrono::Datelike;

use crate::error::ConfigError;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// SerpApi search endpoint.
    pub const SEARCH_API: &str = "https://serpapi.com/search.json";

    /// SerpApi engine used for scholarly search.
    pub const SEARCH_ENGINE: &str = "google_scholar";

    /// Google Translate web endpoint.
    pub const TRANSLATE_API: &str = "https://translate.googleapis.com/translate_a/single";

    /// Environment variable holding the SerpApi key.
    pub const API_KEY_VAR: &str = "SERPAPI_KEY";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Retries on transient failures.
    pub const MAX_RETRIES: u32 = 3;
}

/// Search defaults.
pub mod defaults {
    /// Topical query tracked by the report.
    pub const QUERY: &str =
        r#"optimization (Muon OR Gluon OR Shampoo OR "linear minimization oracle" OR LMO)"#;

    /// How many years back from the current year the search reaches.
    pub const YEAR_SPAN: i32 = 2;

    /// Result-count hint passed to the search provider.
    pub const NUM_RESULTS: u32 = 20;

    /// Interface language hint.
    pub const LANGUAGE: &str = "zh-CN";

    /// Report file.
    pub const REPORT_PATH: &str = "papers.md";
}

/// Digest configuration.
#[derive(Clone)]
pub struct Config {
    /// SerpApi key (required).
    pub api_key: String,

    /// Search endpoint (for testing with mock servers).
    pub search_api_url: String,

    /// Translation endpoint (for testing with mock servers).
    pub translate_api_url: String,

    /// Search query.
    pub query: String,

    /// Earliest publication year.
    pub year_low: i32,

    /// Latest publication year.
    pub year_high: i32,

    /// Result-count hint.
    pub num_results: u32,

    /// Interface language hint.
    pub language: String,

    /// Markdown report path.
    pub report_path: PathBuf,

    /// Target language for abstract translation; `None` disables translation.
    pub translate_to: Option<String>,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Retries on transient failures.
    pub max_retries: u32,
}

impl Config {
    /// Create a configuration with defaults around the given credential.
    ///
    /// The year range defaults to the last [`defaults::YEAR_SPAN`] years up to
    /// the current one.
    pub fn new(api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingCredential { var: api::API_KEY_VAR })?;

        Ok(Self::with_key(api_key))
    }

    fn with_key(api_key: String) -> Self {
        let year_high = chrono::Local::now().year();

        Self {
            api_key,
            search_api_url: api::SEARCH_API.to_string(),
            translate_api_url: api::TRANSLATE_API.to_string(),
            query: defaults::QUERY.to_string(),
            year_low: year_high - defaults::YEAR_SPAN,
            year_high,
            num_results: defaults::NUM_RESULTS,
            language: defaults::LANGUAGE.to_string(),
            report_path: PathBuf::from(defaults::REPORT_PATH),
            translate_to: None,
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_retries: api::MAX_RETRIES,
        }
    }

    /// Create a test configuration pointed at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        let mut config = Self::with_key("test-key".to_string());
        config.search_api_url = format!("{base_url}/search.json");
        config.translate_api_url = format!("{base_url}/translate_a/single");
        config.year_low = 2024;
        config.year_high = 2026;
        config.request_timeout = Duration::from_secs(5);
        config.connect_timeout = Duration::from_secs(2);
        config.max_retries = 0; // No retry delays in tests
        config
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `SERPAPI_KEY` (required) and `TRANSLATE_TO` (optional).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new(std::env::var(api::API_KEY_VAR).ok())?;
        config.translate_to = std::env::var("TRANSLATE_TO").ok().filter(|t| !t.is_empty());
        Ok(config)
    }

    /// Set the search query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Set the publication year range.
    #[must_use]
    pub fn with_years(mut self, low: i32, high: i32) -> Self {
        self.year_low = low;
        self.year_high = high;
        self
    }

    /// Set the report path.
    #[must_use]
    pub fn with_report_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = path.into();
        self
    }

    /// Enable translation of abstracts into `target`.
    #[must_use]
    pub fn with_translation(mut self, target: impl Into<String>) -> Self {
        self.translate_to = Some(target.into());
        self
    }

    /// Check the non-credential values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.query.trim().is_empty() {
            return Err(ConfigError::invalid("query", "cannot be empty"));
        }
        if self.year_low > self.year_high {
            return Err(ConfigError::invalid(
                "year_low",
                format!("{} is after year_high {}", self.year_low, self.year_high),
            ));
        }
        if self.num_results == 0 {
            return Err(ConfigError::invalid("num_results", "must be at least 1"));
        }
        url::Url::parse(&self.search_api_url)
            .map_err(|e| ConfigError::invalid("search_api_url", e.to_string()))?;
        if self.translate_to.is_some() {
            url::Url::parse(&self.translate_api_url)
                .map_err(|e| ConfigError::invalid("translate_api_url", e.to_string()))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("search_api_url", &self.search_api_url)
            .field("query", &self.query)
            .field("year_low", &self.year_low)
            .field("year_high", &self.year_high)
            .field("num_results", &self.num_results)
            .field("language", &self.language)
            .field("report_path", &self.report_path)
            .field("translate_to", &self.translate_to)
            .finish_non_exhaustive()
    }
}
