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

use crate::domain::models::crawl_outcome::CrawlOutcome;
use crate::domain::models::keyword_set::KeywordSet;
use crate::domain::services::content_filter::ContentFilter;
use crate::domain::services::url_finder::UrlFinder;
use crate::engines::traits::{CrawlEngine, EngineError};
use crate::utils::errors::ToolError;
use std::sync::Arc;
use tracing::{debug, info};

/// 清洗后文档的默认最小长度，结果需严格超过该值
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 100;

/// 爬取服务
///
/// 通过抓取引擎并发获取页面，对每个成功的结果执行内容过滤，
/// 并丢弃过短或为空的文档。输出顺序与引擎返回的顺序一致
pub struct CrawlService {
    /// 抓取引擎
    engine: Arc<dyn CrawlEngine>,
    /// URL 查找服务
    url_finder: Arc<UrlFinder>,
    /// 内容过滤器
    filter: ContentFilter,
    /// 最小内容长度（字符数）
    min_content_chars: usize,
}

impl CrawlService {
    /// 创建新的爬取服务实例
    ///
    /// # 参数
    ///
    /// * `engine` - 抓取引擎
    /// * `url_finder` - 用于 `find_and_crawl` 的 URL 查找服务
    pub fn new(engine: Arc<dyn CrawlEngine>, url_finder: Arc<UrlFinder>) -> Self {
        Self {
            engine,
            url_finder,
            filter: ContentFilter::global().clone(),
            min_content_chars: DEFAULT_MIN_CONTENT_CHARS,
        }
    }

    /// 设置最小内容长度
    pub fn with_min_content_chars(mut self, min_content_chars: usize) -> Self {
        self.min_content_chars = min_content_chars;
        self
    }

    /// 抓取并清洗一组 URL
    ///
    /// 单个 URL 的失败被静默丢弃；只有引擎整体失败时返回错误
    ///
    /// # 返回值
    ///
    /// * `Ok(Vec<String>)` - 通过长度检查的清洗后文档
    /// * `Err(EngineError)` - 抓取引擎无法执行
    pub async fn crawl_and_clean(
        &self,
        urls: &[String],
        keywords: Option<&KeywordSet>,
    ) -> Result<Vec<String>, EngineError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            engine = self.engine.name(),
            urls = urls.len(),
            "Crawling pages"
        );
        let outcomes = self.engine.crawl_many(urls).await?;

        let documents: Vec<String> = outcomes
            .iter()
            .filter_map(|outcome| self.clean_outcome(outcome, keywords))
            .collect();

        info!(
            requested = urls.len(),
            kept = documents.len(),
            "Crawl finished"
        );
        Ok(documents)
    }

    /// 搜索并抓取
    ///
    /// 关键词由原始查询按空白切分得到（不含 YouTube 排除运算符）。
    /// 搜索没有返回 URL 时直接返回空列表
    pub async fn find_and_crawl(
        &self,
        query: &str,
        num_results: u32,
        exclude_youtube: bool,
    ) -> Result<Vec<String>, ToolError> {
        let results = self
            .url_finder
            .find(query, num_results, exclude_youtube)
            .await?;
        let urls: Vec<String> = results
            .into_iter()
            .map(|r| r.link)
            .filter(|link| !link.is_empty())
            .collect();
        if urls.is_empty() {
            debug!(query, "Search returned no URLs");
            return Ok(Vec::new());
        }

        let keywords = KeywordSet::from_query(query);
        Ok(self.crawl_and_clean(&urls, Some(&keywords)).await?)
    }

    fn clean_outcome(&self, outcome: &CrawlOutcome, keywords: Option<&KeywordSet>) -> Option<String> {
        let Some(markdown) = outcome.usable_markdown() else {
            debug!(
                url = %outcome.url,
                error = outcome.error.as_deref().unwrap_or("empty content"),
                "Skipping unsuccessful crawl"
            );
            return None;
        };

        let raw = markdown.replace('\0', "");
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let cleaned = self.filter.clean(raw, keywords);
        if cleaned.trim().chars().count() > self.min_content_chars {
            Some(cleaned)
        } else {
            debug!(url = %outcome.url, chars = cleaned.chars().count(), "Dropping short document");
            None
        }
    }
}

#[cfg(test)]
#[path = "crawl_service_test.rs"]
mod tests;
