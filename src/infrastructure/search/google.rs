// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::GoogleSearchSettings;
use crate::domain::models::search_result::SearchResult;
use crate::domain::search::engine::{SearchEngine, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// 单次请求的最大结果数（API 限制）
const MAX_PAGE_SIZE: u32 = 10;
/// `start` 参数的上限，API 最多返回前 100 条结果
const MAX_START: u32 = 91;

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    items: Option<Vec<GoogleSearchItem>>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

/// Google 可编程搜索 (Custom Search JSON API) 引擎
pub struct GoogleSearchEngine {
    client: Client,
    api_key: Option<String>,
    cx: Option<String>,
    base_url: String,
}

impl GoogleSearchEngine {
    pub fn new(settings: &GoogleSearchSettings) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| {
                SearchError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            cx: settings.cx.clone().filter(|c| !c.is_empty()),
            base_url: settings.base_url.clone(),
        })
    }

    fn credentials(&self) -> Result<(&str, &str), SearchError> {
        match (self.api_key.as_deref(), self.cx.as_deref()) {
            (Some(key), Some(cx)) => Ok((key, cx)),
            (None, _) => Err(SearchError::MissingCredentials(
                "google_search.api_key (GOOGLE_API_KEY)".to_string(),
            )),
            (_, None) => Err(SearchError::MissingCredentials(
                "google_search.cx (GOOGLE_CSE_ID)".to_string(),
            )),
        }
    }

    async fn fetch_page(
        &self,
        query: &str,
        start: u32,
        num: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        let (key, cx) = self.credentials()?;
        let num = num.to_string();
        let start = start.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", key),
                ("cx", cx),
                ("q", query),
                ("num", num.as_str()),
                ("start", start.as_str()),
            ])
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GoogleErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SearchError::NetworkError(format!(
                "Google Search API returned status {}: {}",
                status, message
            )));
        }

        let page: GoogleSearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::EngineError(format!("Invalid response body: {}", e)))?;

        Ok(page
            .items
            .unwrap_or_default()
            .into_iter()
            .filter_map(|item| {
                let link = item.link.filter(|l| !l.is_empty())?;
                Some(SearchResult {
                    title: item.title.unwrap_or_default(),
                    link,
                    snippet: item.snippet.unwrap_or_default(),
                })
            })
            .collect())
    }
}

fn map_request_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::NetworkError(format!("HTTP request failed: {}", e))
    }
}

#[async_trait]
impl SearchEngine for GoogleSearchEngine {
    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".to_string()));
        }
        self.credentials()?;

        let limit = limit.max(1) as usize;
        let mut results: Vec<SearchResult> = Vec::with_capacity(limit);
        let mut start = 1u32;

        // API 每页最多 10 条，按 start=1,11,21... 翻页
        while results.len() < limit && start <= MAX_START {
            let num = MAX_PAGE_SIZE.min((limit - results.len()) as u32);
            let page = self.fetch_page(query, start, num).await?;
            let received = page.len() as u32;
            debug!(start, num, received, "Google Search page fetched");

            results.extend(page);
            if received < num {
                break;
            }
            start += num;
        }

        results.truncate(limit);
        if results.is_empty() {
            warn!(query, "Google Search returned no results");
        } else {
            info!(query, count = results.len(), "Google Search completed");
        }
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
