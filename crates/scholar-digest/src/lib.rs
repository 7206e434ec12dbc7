//! Scholar Digest
//!
//! Keeps a markdown report of recent Google Scholar papers for a fixed query.
//! Each run searches through SerpApi, drops citation-only and book entries and
//! anything the report already links to, optionally translates the abstracts,
//! and prepends the new rows above the existing table.
//!
//! # Example
//!
//! ```no_run
//! use scholar_digest::{Config, Digest};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     config.validate()?;
//!     let summary = Digest::new(config)?.run().await?;
//!     println!("{} new papers", summary.written);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod translate;

pub use client::ScholarClient;
pub use config::Config;
pub use error::{ClientError, ConfigError, ReportError};
pub use pipeline::{Digest, RunSummary};
pub use report::{Report, merge};
