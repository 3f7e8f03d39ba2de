// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::json;
use std::sync::Arc;
use webfinder::application::tools::WebFinderTools;
use webfinder::config::settings::Settings;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SOLAR_PAGE: &str = r#"<html>
<head><title>Solar</title><style>.nav{display:none}</style></head>
<body>
<nav><a href="/">Home</a> <a href="/about">About</a></nav>
<h2>Menu</h2>
<p>Solar panels convert sunlight directly into electricity using photovoltaic cells made of silicon.</p>
<p>Installation costs have fallen sharply over the last decade, making rooftop systems affordable for many households.</p>
<p>Short unrelated note.</p>
<p>© 2024 Example Energy Ltd. All rights reserved.</p>
<script>trackVisitor();</script>
</body>
</html>"#;

pub const TINY_PAGE: &str = "<html><body><p>Too short.</p></body></html>";

/// 提供 Google、NewsAPI 和待抓取页面的模拟服务
pub struct TestBackend {
    pub server: MockServer,
}

impl TestBackend {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let base = server.uri();

        Mock::given(method("GET"))
            .and(path("/customsearch/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [
                    {"title": "Solar guide", "link": format!("{}/pages/solar", base), "snippet": "All about solar"},
                    {"title": "Solar video", "link": "https://www.youtube.com/watch?v=solar", "snippet": "Watch"},
                    {"title": "Tiny", "link": format!("{}/pages/tiny", base), "snippet": "tiny"},
                    {"title": "Broken", "link": format!("{}/pages/missing", base), "snippet": "404"}
                ]
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/pages/solar"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=utf-8")
                    .set_body_string(SOLAR_PAGE),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/pages/tiny"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html")
                    .set_body_string(TINY_PAGE),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/pages/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v2/everything"))
            .and(query_param("apiKey", "news-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "ok",
                "totalResults": 3,
                "articles": [
                    {"title": "Solar output hits record", "url": "https://news.test/solar", "description": "Grid data"},
                    {"title": "", "url": "https://news.test/empty-title", "description": "x"},
                    {"title": "No description", "url": "https://news.test/plain", "description": null}
                ]
            })))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn page_url(&self, name: &str) -> String {
        format!("{}/pages/{}", self.server.uri(), name)
    }

    /// 指向模拟服务并带完整凭据的配置
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::defaults().unwrap();
        settings.google_search.api_key = Some("google-key".to_string());
        settings.google_search.cx = Some("cx-id".to_string());
        settings.google_search.base_url = format!("{}/customsearch/v1", self.server.uri());
        settings.news.api_key = Some("news-key".to_string());
        settings.news.base_url = self.server.uri();
        settings.crawler.allow_private_hosts = true;
        settings.crawler.timeout_secs = 5;
        settings
    }

    pub fn tools(&self) -> Arc<WebFinderTools> {
        Arc::new(WebFinderTools::from_settings(&self.settings()).unwrap())
    }
}
