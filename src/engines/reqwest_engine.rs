// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::CrawlerSettings;
use crate::domain::models::crawl_outcome::CrawlOutcome;
use crate::engines::traits::{CrawlEngine, EngineError};
use crate::engines::validators;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use htmd::options::{HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, LOCATION, PRAGMA};
use reqwest::redirect::Policy;
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// 转换为 Markdown 时整体跳过的标签
const SKIPPED_TAGS: [&str; 4] = ["head", "script", "style", "noscript"];

/// 单个 URL 最多跟随的重定向次数
const MAX_REDIRECTS: usize = 10;

/// 抓取引擎
///
/// 基于reqwest实现的HTTP抓取引擎。页面并发获取，
/// HTML 转换为 Markdown，结果顺序与输入URL顺序一致
pub struct ReqwestEngine {
    client: reqwest::Client,
    max_concurrency: usize,
    allow_private_hosts: bool,
}

impl ReqwestEngine {
    /// 根据爬虫配置创建引擎
    ///
    /// # 参数
    ///
    /// * `settings` - 爬虫配置
    ///
    /// # 返回值
    ///
    /// * `Ok(ReqwestEngine)` - 引擎实例
    /// * `Err(EngineError)` - HTTP 客户端构建失败
    pub fn new(settings: &CrawlerSettings) -> Result<Self, EngineError> {
        // 始终获取最新内容
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout())
            .default_headers(headers)
            // 重定向由 fetch_markdown 逐跳跟随，每一跳都要重新校验
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            client,
            max_concurrency: settings.max_concurrency.max(1),
            allow_private_hosts: settings.allow_private_hosts,
        })
    }

    async fn fetch_one(&self, url: String) -> CrawlOutcome {
        match self.fetch_markdown(&url).await {
            Ok(markdown) => CrawlOutcome::succeeded(url, markdown),
            Err(e) => {
                warn!(url = %url, error = %e, "Page fetch failed");
                CrawlOutcome::failed(url, e.to_string())
            }
        }
    }

    async fn fetch_markdown(&self, url: &str) -> Result<String, EngineError> {
        let start = Instant::now();
        let response = self.send_following_redirects(url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::Other(format!("HTTP status {}", status)));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text/html")
            .to_ascii_lowercase();

        let body = response.text().await?;
        debug!(
            url,
            status = status.as_u16(),
            bytes = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Page fetched"
        );

        to_markdown(&content_type, &body)
    }

    async fn send_following_redirects(&self, url: &str) -> Result<reqwest::Response, EngineError> {
        let mut target = validators::validate_url(url, self.allow_private_hosts).await?;

        for _ in 0..=MAX_REDIRECTS {
            let response = self
                .client
                .get(target.clone())
                .send()
                .await
                .map_err(request_error)?;

            if !matches!(response.status().as_u16(), 301 | 302 | 303 | 307 | 308) {
                return Ok(response);
            }

            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
                .ok_or_else(|| {
                    EngineError::Other(format!(
                        "HTTP status {} without Location header",
                        response.status()
                    ))
                })?;
            let next = self.redirect_target(&target, location).await?;
            debug!(from = %target, to = %next, "Following redirect");
            target = next;
        }

        Err(EngineError::Other(format!(
            "too many redirects (more than {})",
            MAX_REDIRECTS
        )))
    }

    /// 解析重定向目标并按首个 URL 相同的规则校验
    async fn redirect_target(&self, current: &Url, location: &str) -> Result<Url, EngineError> {
        let next = current.join(location).map_err(|e| EngineError::InvalidUrl {
            url: location.to_string(),
            reason: e.to_string(),
        })?;
        validators::validate_url(next.as_str(), self.allow_private_hosts).await
    }
}

fn request_error(e: reqwest::Error) -> EngineError {
    if e.is_timeout() {
        EngineError::Timeout
    } else {
        EngineError::RequestFailed(e)
    }
}

/// 按内容类型把响应体转换为 Markdown
///
/// 缺省或空的内容类型视为 HTML
fn to_markdown(content_type: &str, body: &str) -> Result<String, EngineError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();

    match mime {
        "" | "text/html" | "application/xhtml+xml" => html_to_markdown(body),
        "text/plain" | "text/markdown" | "text/x-markdown" => Ok(body.to_string()),
        other => Err(EngineError::Other(format!(
            "unsupported content type '{}'",
            other
        ))),
    }
}

fn html_to_markdown(html: &str) -> Result<String, EngineError> {
    // 导航标题的清洗规则依赖 `#` 风格的标题
    HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build()
        .convert(html)
        .map_err(|e| EngineError::Other(format!("HTML conversion failed: {}", e)))
}

#[async_trait]
impl CrawlEngine for ReqwestEngine {
    /// 批量抓取
    ///
    /// 最多同时进行 `max_concurrency` 个请求；`buffered` 保证输出顺序与输入一致
    async fn crawl_many(&self, urls: &[String]) -> Result<Vec<CrawlOutcome>, EngineError> {
        let outcomes = stream::iter(urls.iter().cloned())
            .map(|url| self.fetch_one(url))
            .buffered(self.max_concurrency)
            .collect::<Vec<_>>()
            .await;
        Ok(outcomes)
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
