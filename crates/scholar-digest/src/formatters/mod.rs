//! Output formatters for the markdown report.

mod markdown;

pub use markdown::*;
