//! SerpApi Google Scholar client.
//!
//! Provides an async HTTP client with:
//! - Retry middleware with exponential backoff
//! - Typed status mapping (401/403, 429, 5xx)
//! - Detection of API-level errors reported in a 200 body

mod middleware;

pub(crate) use middleware::{build_http_client, handle_response};

use reqwest_middleware::ClientWithMiddleware;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{ScholarResult, SearchResponse};

/// Parameters of one scholar search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Query string.
    pub query: String,
    /// Earliest publication year.
    pub year_low: i32,
    /// Latest publication year.
    pub year_high: i32,
    /// Result-count hint.
    pub num: u32,
    /// Interface language hint.
    pub language: String,
}

impl SearchParams {
    /// Take the search parameters from a configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            query: config.query.clone(),
            year_low: config.year_low,
            year_high: config.year_high,
            num: config.num_results,
            language: config.language.clone(),
        }
    }
}

/// Google Scholar search client backed by SerpApi.
#[derive(Clone)]
pub struct ScholarClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// SerpApi key.
    api_key: String,

    /// Search endpoint.
    search_api_url: String,
}

impl ScholarClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &Config) -> ClientResult<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            api_key: config.api_key.clone(),
            search_api_url: config.search_api_url.clone(),
        })
    }

    /// Search Google Scholar and return the organic results.
    pub async fn search(&self, params: &SearchParams) -> ClientResult<Vec<ScholarResult>> {
        let query = [
            ("engine", api::SEARCH_ENGINE.to_string()),
            ("q", params.query.clone()),
            ("as_ylo", params.year_low.to_string()),
            ("as_yhi", params.year_high.to_string()),
            ("num", params.num.to_string()),
            ("hl", params.language.clone()),
            ("api_key", self.api_key.clone()),
        ];

        tracing::debug!(query = %params.query, year_low = params.year_low, year_high = params.year_high, "Searching scholar");

        let response = self.client.get(&self.search_api_url).query(&query).send().await?;
        let response = handle_response(response).await?;
        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)?;

        if let Some(error) = parsed.error {
            // SerpApi reports an empty result page as an error; that is just zero results.
            if error.contains("hasn't returned any results") {
                return Ok(Vec::new());
            }
            return Err(ClientError::Api(error));
        }

        Ok(parsed.organic_results)
    }
}

impl std::fmt::Debug for ScholarClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScholarClient").field("search_api_url", &self.search_api_url).finish()
    }
}
