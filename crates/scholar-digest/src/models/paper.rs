//! Paper data models matching the SerpApi Google Scholar schema.

use serde::{Deserialize, Serialize};

/// Title markers Google Scholar puts on citation-only and book entries.
pub const EXCLUDED_TITLE_MARKERS: &[&str] = &["[CITATION]", "[B]"];

/// Top-level SerpApi search response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Organic scholar results.
    #[serde(default)]
    pub organic_results: Vec<ScholarResult>,

    /// API-level error message (quota, bad key, no results).
    #[serde(default)]
    pub error: Option<String>,
}

/// One raw search result, before filtering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScholarResult {
    /// Result title, possibly carrying a `[CITATION]` or `[B]` marker.
    #[serde(default)]
    pub title: Option<String>,

    /// Landing page URL.
    #[serde(default)]
    pub link: Option<String>,

    /// Abstract excerpt.
    #[serde(default)]
    pub snippet: Option<String>,

    /// Authors, venue and year.
    #[serde(default)]
    pub publication_info: Option<PublicationInfo>,
}

impl ScholarResult {
    /// Get the link if it is present and not blank.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().map(str::trim).filter(|l| !l.is_empty())
    }

    /// Get the title, or an empty string.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// Check whether the title carries a citation or book marker.
    #[must_use]
    pub fn has_excluded_marker(&self) -> bool {
        let title = self.title_or_default().to_uppercase();
        EXCLUDED_TITLE_MARKERS.iter().any(|m| title.contains(m))
    }

    /// Get the publication summary if available.
    #[must_use]
    pub fn publication_summary(&self) -> Option<&str> {
        self.publication_info.as_ref()?.summary.as_deref()
    }
}

/// Publication details attached to a result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PublicationInfo {
    /// Free-text summary, e.g. "J Doe, A Smith - arXiv preprint, 2025 - arxiv.org".
    #[serde(default)]
    pub summary: Option<String>,
}

/// A paper accepted into the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    /// Paper title.
    pub title: String,

    /// Landing page URL; the deduplication key.
    pub link: String,

    /// Publication summary shown in the first column.
    pub publication_info: String,

    /// Abstract excerpt.
    pub snippet: String,

    /// Translated abstract, when translation is enabled.
    pub translated_snippet: Option<String>,
}

impl PaperRecord {
    /// Build a record from a search result that has a link.
    #[must_use]
    pub fn from_result(result: &ScholarResult, link: &str) -> Self {
        Self {
            title: result.title_or_default().to_string(),
            link: link.to_string(),
            publication_info: result.publication_summary().unwrap_or_default().to_string(),
            snippet: result.snippet.clone().unwrap_or_default(),
            translated_snippet: None,
        }
    }
}
