//! Candidate validation and deduplication.

use std::collections::HashSet;

use crate::formatters::canonical_link;
use crate::models::{PaperRecord, ScholarResult};

/// Why a candidate was left out of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No link, or a blank one.
    MissingLink,
    /// Title carries `[CITATION]` or `[B]`.
    ExcludedMarker,
    /// Link is already in the report.
    AlreadyReported,
    /// Link appeared earlier in the same batch.
    DuplicateLink,
    /// Same normalized title appeared earlier in the same batch.
    DuplicateTitle,
}

/// Lowercased alphanumerics of a title, for spotting the same paper under two links.
#[must_use]
pub fn title_slug(title: &str) -> String {
    title.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

/// Stateful filter over one batch of candidates.
#[derive(Debug)]
pub struct CandidateFilter<'a> {
    existing: &'a HashSet<String>,
    seen_links: HashSet<String>,
    seen_titles: HashSet<String>,
}

impl<'a> CandidateFilter<'a> {
    /// Start a batch against the links already in the report.
    #[must_use]
    pub fn new(existing: &'a HashSet<String>) -> Self {
        Self { existing, seen_links: HashSet::new(), seen_titles: HashSet::new() }
    }

    /// Accept or reject the next candidate.
    pub fn check(&mut self, candidate: &ScholarResult) -> Result<PaperRecord, Rejection> {
        let link = candidate.link().ok_or(Rejection::MissingLink)?;

        if candidate.has_excluded_marker() {
            return Err(Rejection::ExcludedMarker);
        }

        let key = canonical_link(link);
        if self.existing.contains(&key) {
            return Err(Rejection::AlreadyReported);
        }
        if self.seen_links.contains(&key) {
            return Err(Rejection::DuplicateLink);
        }

        let slug = title_slug(candidate.title_or_default());
        if !slug.is_empty() && self.seen_titles.contains(&slug) {
            return Err(Rejection::DuplicateTitle);
        }

        self.seen_links.insert(key);
        if !slug.is_empty() {
            self.seen_titles.insert(slug);
        }
        Ok(PaperRecord::from_result(candidate, link))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, link: Option<&str>) -> ScholarResult {
        ScholarResult {
            title: Some(title.to_string()),
            link: link.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_title_slug() {
        assert_eq!(title_slug("Muon: Is Scalable!"), "muonisscalable");
        assert_eq!(title_slug("  "), "");
    }

    #[test]
    fn test_rejection_reasons() {
        let existing: HashSet<String> = ["https://old".to_string()].into();
        let mut filter = CandidateFilter::new(&existing);

        assert_eq!(filter.check(&candidate("A", None)).unwrap_err(), Rejection::MissingLink);
        assert_eq!(
            filter.check(&candidate("[CITATION] A", Some("https://c"))).unwrap_err(),
            Rejection::ExcludedMarker
        );
        assert_eq!(
            filter.check(&candidate("Old", Some("https://old"))).unwrap_err(),
            Rejection::AlreadyReported
        );
        assert!(filter.check(&candidate("New paper", Some("https://new"))).is_ok());
        assert_eq!(
            filter.check(&candidate("Other", Some("https://new"))).unwrap_err(),
            Rejection::DuplicateLink
        );
        assert_eq!(
            filter.check(&candidate("New Paper.", Some("https://mirror"))).unwrap_err(),
            Rejection::DuplicateTitle
        );
    }

    #[test]
    fn test_untitled_candidates_do_not_collide() {
        let existing = HashSet::new();
        let mut filter = CandidateFilter::new(&existing);
        assert!(filter.check(&candidate("", Some("https://x"))).is_ok());
        assert!(filter.check(&candidate("", Some("https://y"))).is_ok());
    }
}
