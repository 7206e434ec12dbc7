//! End-to-end digest runs against mocked APIs and a temp report file.

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_digest::config::Config;
use scholar_digest::translate::TRANSLATION_UNAVAILABLE;
use scholar_digest::{Digest, RunSummary};

async fn mount_search(server: &MockServer, results: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "organic_results": results })))
        .mount(server)
        .await;
}

fn results() -> serde_json::Value {
    json!([
        {
            "title": "Muon is Scalable for LLM Training",
            "link": "https://arxiv.org/abs/2502.16982",
            "snippet": "Recently, the Muon optimizer...",
            "publication_info": {"summary": "J Liu - arXiv preprint, 2025 - arxiv.org"}
        },
        {
            "title": "[CITATION] Shampoo: Preconditioned Stochastic Tensor Optimization",
            "link": "https://scholar.google.com/citation",
            "publication_info": {"summary": "V Gupta - 2018"}
        },
        {
            "title": "Gluon: Making Muon & Scion Great Again",
            "snippet": "no link on this one"
        },
        {
            "title": "Training Deep Learning Models with Norm-Constrained LMOs",
            "link": "https://arxiv.org/abs/2502.07529",
            "snippet": "In this work, we study optimization methods...",
            "publication_info": {"summary": "T Pethick - arXiv preprint, 2025 - arxiv.org"}
        }
    ])
}

#[tokio::test]
async fn test_run_writes_valid_new_papers() {
    let server = MockServer::start().await;
    mount_search(&server, results()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");

    let config =
        Config::for_testing(&server.uri()).with_query("muon optimizer").with_report_path(&report);
    let summary = Digest::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary, RunSummary { fetched: 4, accepted: 2, written: 2 });
    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("[View Details](https://arxiv.org/abs/2502.16982)"));
    assert!(content.contains("[View Details](https://arxiv.org/abs/2502.07529)"));
    assert!(!content.contains("Shampoo"));
    assert!(!content.contains("Gluon"));
}

#[tokio::test]
async fn test_second_run_is_idempotent() {
    let server = MockServer::start().await;
    mount_search(&server, results()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");
    let config = Config::for_testing(&server.uri()).with_report_path(&report);

    Digest::new(config.clone()).unwrap().run().await.unwrap();
    let first = std::fs::read_to_string(&report).unwrap();

    let summary = Digest::new(config).unwrap().run().await.unwrap();
    assert_eq!(summary.written, 0);
    assert_eq!(summary.accepted, 0);
    assert_eq!(std::fs::read_to_string(&report).unwrap(), first);
}

#[tokio::test]
async fn test_search_failure_leaves_report_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");
    std::fs::write(&report, "keep me").unwrap();

    let config = Config::for_testing(&server.uri()).with_report_path(&report);
    let summary = Digest::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary, RunSummary::default());
    assert_eq!(std::fs::read_to_string(&report).unwrap(), "keep me");
}

#[tokio::test]
async fn test_dry_run_does_not_write() {
    let server = MockServer::start().await;
    mount_search(&server, results()).await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");

    let config = Config::for_testing(&server.uri()).with_report_path(&report);
    let summary = Digest::new(config).unwrap().dry_run(true).run().await.unwrap();

    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.written, 0);
    assert!(!report.exists());
}

#[tokio::test]
async fn test_translation_is_paired_with_original() {
    let server = MockServer::start().await;
    mount_search(&server, results()).await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([[["翻译", "src", null, null, 1]], null, "en"])))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");

    let config =
        Config::for_testing(&server.uri()).with_report_path(&report).with_translation("zh-CN");
    Digest::new(config).unwrap().run().await.unwrap();

    let content = std::fs::read_to_string(&report).unwrap();
    assert!(content.contains("翻译<br><br>Recently, the Muon optimizer..."));
}

#[tokio::test]
async fn test_translation_failure_still_writes_rows() {
    let server = MockServer::start().await;
    mount_search(&server, results()).await;
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    let report = dir.path().join("papers.md");

    let config =
        Config::for_testing(&server.uri()).with_report_path(&report).with_translation("zh-CN");
    let summary = Digest::new(config).unwrap().run().await.unwrap();

    assert_eq!(summary.written, 2);
    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content.matches(TRANSLATION_UNAVAILABLE).count(), 2);
}
