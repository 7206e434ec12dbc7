//! The persisted markdown report.
//!
//! A report is a title block, a metadata line and one table. Each run that
//! finds new papers rewrites the title block and header and puts the new rows
//! directly under the header-separator row, above every older row. Older rows
//! are carried over byte for byte.
//!
//! Deduplication reads links back out of the last cell of each row, so the
//! writer and [`extract_links`] share one format. Rows written with the older
//! `[查看详情](...)` label are read too.

mod filter;

pub use filter::{CandidateFilter, Rejection, title_slug};

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReportError, ReportResult};
use crate::formatters::{self, ReportHeader};
use crate::models::{PaperRecord, ScholarResult};

static LINK_CELL_RE: LazyLock<Regex> = LazyLock::new(|| {
    let labels: Vec<String> = std::iter::once(formatters::LINK_LABEL)
        .chain(formatters::LEGACY_LINK_LABELS.iter().copied())
        .map(regex::escape)
        .collect();
    Regex::new(&format!(r"\|\s*\[(?:{})\]\(([^)\s]+)\)\s*\|\s*$", labels.join("|")))
        .expect("valid regex")
});

/// Collect the URLs of the link cells in `text`.
///
/// Only a link that forms the whole last cell of a table row counts, so link
/// syntax quoted inside a title or abstract is never taken for a report entry.
#[must_use]
pub fn extract_links(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.starts_with('|'))
        .filter_map(|line| LINK_CELL_RE.captures(line))
        .map(|c| c[1].to_string())
        .collect()
}

/// Whether a line is a markdown table header-separator row such as `| :--- | ---: |`.
#[must_use]
pub fn is_separator_row(line: &str) -> bool {
    let line = line.trim();
    if line.len() < 2 || !line.starts_with('|') || !line.ends_with('|') {
        return false;
    }
    let cells: Vec<&str> = line[1..line.len() - 1].split('|').map(str::trim).collect();
    cells.iter().all(|cell| {
        cell.contains('-') && cell.chars().all(|c| c == '-' || c == ':')
    })
}

/// Byte offset just past the first header-separator row.
fn history_offset(content: &str) -> Option<usize> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        offset += line.len();
        if is_separator_row(line) {
            return Some(offset);
        }
    }
    None
}

/// A report file, loaded once per run.
#[derive(Debug)]
pub struct Report {
    path: PathBuf,
    content: Option<String>,
    links: HashSet<String>,
}

impl Report {
    /// Load the report at `path`; a missing file is an empty report.
    pub fn open(path: impl Into<PathBuf>) -> ReportResult<Self> {
        let path = path.into();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => return Err(ReportError::io(path, e)),
        };
        let links = content
            .as_deref()
            .and_then(|c| history_offset(c).map(|offset| extract_links(&c[offset..])))
            .unwrap_or_default();

        tracing::debug!(path = %path.display(), links = links.len(), "Loaded report");
        Ok(Self { path, content, links })
    }

    /// Whether the file existed when loaded (or has since been written).
    #[must_use]
    pub const fn exists(&self) -> bool {
        self.content.is_some()
    }

    /// Links already in the report, in canonical form.
    #[must_use]
    pub const fn links(&self) -> &HashSet<String> {
        &self.links
    }

    /// Rows below the header-separator, verbatim; `None` when there is no table.
    #[must_use]
    pub fn history(&self) -> Option<&str> {
        let content = self.content.as_deref()?;
        history_offset(content).map(|offset| &content[offset..])
    }

    /// Number of table rows currently in the report.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.history()
            .map(|h| h.lines().filter(|l| l.trim_start().starts_with('|')).count())
            .unwrap_or(0)
    }

    /// Filter candidates down to new, valid records, keeping input order.
    #[must_use]
    pub fn select(&self, candidates: &[ScholarResult]) -> Vec<PaperRecord> {
        let mut filter = CandidateFilter::new(&self.links);
        candidates
            .iter()
            .filter_map(|candidate| match filter.check(candidate) {
                Ok(record) => Some(record),
                Err(reason) => {
                    tracing::debug!(title = candidate.title_or_default(), ?reason, "Skipping candidate");
                    None
                }
            })
            .collect()
    }

    /// Render the merged document: new header, new rows, then the old rows.
    #[must_use]
    pub fn render(&self, records: &[PaperRecord], header: &ReportHeader) -> String {
        let mut output = formatters::format_header(header);
        for record in records {
            output.push_str(&formatters::format_row(record));
            output.push('\n');
        }

        match self.history() {
            Some(history) => output.push_str(history),
            None if self.exists() => {
                tracing::warn!(path = %self.path.display(), "Report has no table, starting a new one");
            }
            None => {}
        }
        output
    }

    /// Prepend `records` to the report and overwrite the file.
    ///
    /// Writes nothing and returns 0 when `records` is empty.
    pub fn write(&mut self, records: &[PaperRecord], header: &ReportHeader) -> ReportResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let output = self.render(records, header);
        std::fs::write(&self.path, &output).map_err(|e| ReportError::io(&self.path, e))?;

        self.links.extend(records.iter().map(|r| formatters::canonical_link(&r.link)));
        self.content = Some(output);

        tracing::info!(path = %self.path.display(), rows = records.len(), "Report updated");
        Ok(records.len())
    }
}

/// Merge freshly fetched candidates into the report at `path`.
///
/// Returns the number of rows written; 0 means nothing new and no write.
pub fn merge(
    path: impl AsRef<Path>,
    candidates: &[ScholarResult],
    header: &ReportHeader,
) -> ReportResult<usize> {
    let mut report = Report::open(path.as_ref())?;
    let records = report.select(candidates);
    report.write(&records, header)
}
