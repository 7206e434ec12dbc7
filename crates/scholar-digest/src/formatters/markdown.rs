//! Markdown rendering for the report.
//!
//! The link column is read back by later runs to deduplicate, so
//! [`LINK_LABEL`] and the output of [`canonical_link`] must not change
//! without migrating existing reports.

use crate::models::PaperRecord;

/// Report title line.
pub const REPORT_TITLE: &str = "# Automated Literature Tracking Report";

/// Table header row.
pub const TABLE_HEADER: &str = "| Date/Source | Title | Abstract | Link |";

/// Header-separator row.
pub const TABLE_SEPARATOR: &str = "| :--- | :--- | :--- | :--- |";

/// Label of the link in the last column.
pub const LINK_LABEL: &str = "View Details";

/// Link labels of older reports, still recognised when reading links back.
pub const LEGACY_LINK_LABELS: &[&str] = &["查看详情"];

/// Stand-in for empty free-text fields.
pub const EMPTY_FIELD: &str = "N/A";

/// Replacement for the column delimiter inside cells (U+FF5C FULLWIDTH VERTICAL LINE).
pub const ESCAPED_DELIMITER: char = '｜';

/// Values shown in the metadata line above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    /// Search query.
    pub query: String,
    /// Earliest publication year searched.
    pub year_low: i32,
    /// Latest publication year searched.
    pub year_high: i32,
    /// Run timestamp, already formatted.
    pub updated_at: String,
}

impl ReportHeader {
    /// Build a header stamped with the current local time.
    #[must_use]
    pub fn now(query: impl Into<String>, year_low: i32, year_high: i32) -> Self {
        Self {
            query: query.into(),
            year_low,
            year_high,
            updated_at: chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Make free text safe for a table cell.
///
/// Line breaks become spaces, the column delimiter becomes [`ESCAPED_DELIMITER`]
/// and empty text becomes [`EMPTY_FIELD`].
#[must_use]
pub fn clean_text(text: &str) -> String {
    let cleaned = text
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', &ESCAPED_DELIMITER.to_string());
    let cleaned = cleaned.trim();

    if cleaned.is_empty() { EMPTY_FIELD.to_string() } else { cleaned.to_string() }
}

/// Canonical form of a link as written to, and compared against, the report.
///
/// Characters that would end the markdown link or split the table are
/// percent-encoded.
#[must_use]
pub fn canonical_link(link: &str) -> String {
    let mut out = String::with_capacity(link.len());
    for ch in link.trim().chars() {
        match ch {
            '|' | '(' | ')' | '<' | '>' => out.push_str(&format!("%{:02X}", u32::from(ch))),
            c if c.is_whitespace() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

/// Render the abstract cell, pairing translation and original when present.
#[must_use]
pub fn format_abstract(record: &PaperRecord) -> String {
    let original = clean_text(&record.snippet);
    match &record.translated_snippet {
        Some(translated) => format!("{}<br><br>{}", clean_text(translated), original),
        None => original,
    }
}

/// Render one table row for a record.
#[must_use]
pub fn format_row(record: &PaperRecord) -> String {
    format!(
        "| {} | **{}** | {} | [{}]({}) |",
        clean_text(&record.publication_info),
        clean_text(&record.title),
        format_abstract(record),
        LINK_LABEL,
        canonical_link(&record.link),
    )
}

/// Render the title block, metadata line and table header.
///
/// The result ends with a newline after the header-separator row.
#[must_use]
pub fn format_header(header: &ReportHeader) -> String {
    let mut output = format!("{REPORT_TITLE}\n\n");
    output.push_str(&format!(
        "> **Query**: `{}` | **Years**: {}-{} | **Updated**: {}\n\n",
        header.query.replace(['\n', '\r'], " "),
        header.year_low,
        header.year_high,
        header.updated_at
    ));
    output.push_str(TABLE_HEADER);
    output.push('\n');
    output.push_str(TABLE_SEPARATOR);
    output.push('\n');
    output
}
