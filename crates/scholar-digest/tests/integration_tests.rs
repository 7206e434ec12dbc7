//! Integration tests for the scholar digest.
//!
//! These tests hit the real SerpApi and Google Translate endpoints and spend
//! one search credit each.
//! Run with: `SERPAPI_KEY=... cargo test --features integration -- --nocapture`

#![cfg(feature = "integration")]

use scholar_digest::client::{ScholarClient, SearchParams};
use scholar_digest::config::Config;
use scholar_digest::translate::{GoogleTranslator, Translator};
use scholar_digest::Digest;

fn create_config() -> Config {
    Config::from_env().expect("SERPAPI_KEY must be set for integration tests")
}

#[tokio::test]
async fn test_search_returns_results() {
    let config = create_config();
    let client = ScholarClient::new(&config).expect("Failed to create client");

    let results = client
        .search(&SearchParams::from_config(&config))
        .await
        .expect("Search should succeed");

    assert!(!results.is_empty(), "Should return some papers");
    assert!(results.iter().any(|r| r.link().is_some()));
}

#[tokio::test]
async fn test_translate_into_chinese() {
    let config = create_config();
    let translator = GoogleTranslator::new(&config, "zh-CN").expect("Failed to create translator");

    let translated = translator.try_translate("optimization").await.expect("Translation should succeed");
    assert!(!translated.is_empty());
    assert!(translator.translate("hello").await.is_some());
}

#[tokio::test]
async fn test_full_run_twice() {
    let dir = tempfile::tempdir().unwrap();
    let config = create_config().with_report_path(dir.path().join("papers.md"));

    let first = Digest::new(config.clone()).unwrap().run().await.unwrap();
    let second = Digest::new(config).unwrap().run().await.unwrap();

    assert_eq!(first.written, first.accepted);
    assert_eq!(second.written, 0);
}
