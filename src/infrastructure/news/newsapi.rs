// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::NewsSettings;
use crate::domain::models::news_article::RawArticle;
use crate::domain::news::provider::{NewsError, NewsProvider};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

const USER_AGENT: &str = concat!("webfinder/", env!("CARGO_PKG_VERSION"));

/// `/v2/everything` 响应体
///
/// 成功时 `status` 为 `"ok"`，失败时为 `"error"` 并附带 `message`
#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// NewsAPI.org 客户端
pub struct NewsApiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl NewsApiClient {
    pub fn new(settings: &NewsSettings) -> Result<Self, NewsError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NewsError::RequestFailed(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v2/everything", self.base_url)
    }
}

#[async_trait]
impl NewsProvider for NewsApiClient {
    async fn fetch_articles(&self, query: &str) -> Result<Vec<RawArticle>, NewsError> {
        let api_key = self.api_key.as_deref().ok_or(NewsError::MissingApiKey)?;

        debug!(query, "Requesting NewsAPI");
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("q", query), ("apiKey", api_key)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NewsError::RequestFailed("request timed out".to_string())
                } else {
                    NewsError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NewsError::RequestFailed(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EverythingResponse = serde_json::from_str(&body)
            .map_err(|e| NewsError::MalformedResponse(e.to_string()))?;
        if parsed.status == "error" {
            return Err(NewsError::ApiError {
                status: status.as_u16(),
                message: parsed.message.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        info!(query, count = parsed.articles.len(), "NewsAPI returned articles");
        Ok(parsed.articles)
    }

    fn name(&self) -> &'static str {
        "newsapi"
    }
}
