// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestBackend;
use webfinder::application::tools::WebFinderTools;

#[tokio::test]
async fn google_urls_excludes_youtube() {
    let backend = TestBackend::start().await;

    let urls = backend.tools().google_urls("solar panels", 5, true).await;

    assert_eq!(
        urls,
        vec![
            backend.page_url("solar"),
            backend.page_url("tiny"),
            backend.page_url("missing"),
        ]
    );
}

#[tokio::test]
async fn google_urls_keeps_youtube_when_allowed() {
    let backend = TestBackend::start().await;

    let urls = backend.tools().google_urls("solar panels", 5, false).await;

    assert_eq!(urls.len(), 4);
    assert!(urls.iter().any(|u| u.contains("youtube.com")));
}

#[tokio::test]
async fn crawl_returns_only_useful_documents() {
    let backend = TestBackend::start().await;
    let urls = vec![
        backend.page_url("solar"),
        backend.page_url("tiny"),
        backend.page_url("missing"),
    ];

    let docs = backend.tools().crawl(&urls).await;

    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert!(doc.contains("photovoltaic cells"));
    assert!(doc.contains("Short unrelated note."));
    assert!(!doc.contains("trackVisitor"));
    assert!(!doc.contains("All rights reserved"));
    assert!(!doc.contains("Menu"));
    assert!(!doc.contains('\0'));
    assert_eq!(doc.trim(), doc);
    assert!(!doc.contains("\n\n\n"));
}

#[tokio::test]
async fn search_and_crawl_narrows_to_query_terms() {
    let backend = TestBackend::start().await;

    let docs = backend
        .tools()
        .search_and_crawl("solar", 5, true)
        .await;

    assert_eq!(docs.len(), 1);
    let doc = &docs[0];
    assert!(doc.contains("photovoltaic cells"));
    // 首段命中后，后续超过 50 字符的段落一并保留
    assert!(doc.contains("Installation costs have fallen"));
    assert!(!doc.contains("Short unrelated note."));
}

#[tokio::test]
async fn news_drops_incomplete_articles() {
    let backend = TestBackend::start().await;

    let articles = backend.tools().news("solar").await;

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Solar output hits record");
    assert_eq!(articles[1].url, "https://news.test/plain");
    assert_eq!(articles[1].description, "");
}

#[tokio::test]
async fn missing_credentials_yield_empty_results() {
    let backend = TestBackend::start().await;
    let mut settings = backend.settings();
    settings.google_search.api_key = None;
    settings.news.api_key = None;
    let tools = WebFinderTools::from_settings(&settings).unwrap();

    assert!(tools.google_urls("solar", 5, true).await.is_empty());
    assert!(tools.search_and_crawl("solar", 5, true).await.is_empty());
    assert!(tools.news("solar").await.is_empty());
}

#[tokio::test]
async fn private_hosts_are_refused_by_default() {
    let backend = TestBackend::start().await;
    let mut settings = backend.settings();
    settings.crawler.allow_private_hosts = false;
    let tools = WebFinderTools::from_settings(&settings).unwrap();

    assert!(tools.crawl(&[backend.page_url("solar")]).await.is_empty());
}
