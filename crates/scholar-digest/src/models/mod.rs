//! Data models for search results and report records.
//!
//! Wire models use `#[serde(default)]` throughout; SerpApi omits fields freely.

mod paper;

pub use paper::{
    EXCLUDED_TITLE_MARKERS, PaperRecord, PublicationInfo, ScholarResult, SearchResponse,
};
