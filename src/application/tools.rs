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

use crate::config::settings::Settings;
use crate::domain::models::news_article::NewsArticle;
use crate::domain::services::crawl_service::CrawlService;
use crate::domain::services::news_service::NewsService;
use crate::domain::services::url_finder::UrlFinder;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::infrastructure::news::NewsApiClient;
use crate::infrastructure::search::GoogleSearchEngine;
use crate::utils::errors::ToolError;
use std::sync::Arc;
use tracing::{error, info};

/// 对外暴露的四个工具
///
/// 所有方法对调用方都是全函数：内部错误只记录日志，并以空结果返回
#[derive(Clone)]
pub struct WebFinderTools {
    url_finder: Arc<UrlFinder>,
    crawl_service: Arc<CrawlService>,
    news_service: Arc<NewsService>,
}

impl WebFinderTools {
    pub fn new(
        url_finder: Arc<UrlFinder>,
        crawl_service: Arc<CrawlService>,
        news_service: Arc<NewsService>,
    ) -> Self {
        Self {
            url_finder,
            crawl_service,
            news_service,
        }
    }

    /// 根据配置装配生产环境的提供方
    ///
    /// 缺少凭据不会导致失败；对应的工具在调用时返回空结果
    pub fn from_settings(settings: &Settings) -> Result<Self, ToolError> {
        let search_engine = Arc::new(GoogleSearchEngine::new(&settings.google_search)?);
        let crawl_engine = Arc::new(ReqwestEngine::new(&settings.crawler)?);
        let news_client = Arc::new(NewsApiClient::new(&settings.news)?);

        let url_finder = Arc::new(UrlFinder::new(search_engine));
        let crawl_service = Arc::new(
            CrawlService::new(crawl_engine, url_finder.clone())
                .with_min_content_chars(settings.filter.min_content_chars),
        );
        let news_service = Arc::new(NewsService::new(news_client));

        Ok(Self::new(url_finder, crawl_service, news_service))
    }

    /// 搜索并返回结果链接
    pub async fn google_urls(
        &self,
        query: &str,
        num_results: u32,
        exclude_youtube: bool,
    ) -> Vec<String> {
        match self
            .url_finder
            .find(query, num_results, exclude_youtube)
            .await
        {
            Ok(results) => {
                info!(query, count = results.len(), "google_urls completed");
                results.into_iter().map(|r| r.link).collect()
            }
            Err(e) => {
                error!(query, error = %e, "google_urls failed");
                Vec::new()
            }
        }
    }

    /// 抓取并清洗给定的 URL，不做关键词收窄
    pub async fn crawl(&self, urls: &[String]) -> Vec<String> {
        match self.crawl_service.crawl_and_clean(urls, None).await {
            Ok(documents) => documents,
            Err(e) => {
                error!(urls = urls.len(), error = %e, "crawl failed");
                Vec::new()
            }
        }
    }

    pub async fn search_and_crawl(
        &self,
        query: &str,
        num_results: u32,
        exclude_youtube: bool,
    ) -> Vec<String> {
        match self
            .crawl_service
            .find_and_crawl(query, num_results, exclude_youtube)
            .await
        {
            Ok(documents) => documents,
            Err(e) => {
                error!(query, error = %e, "search_and_crawl failed");
                Vec::new()
            }
        }
    }

    pub async fn news(&self, query: &str) -> Vec<NewsArticle> {
        match self.news_service.news(query).await {
            Ok(articles) => articles,
            Err(e) => {
                error!(query, error = %e, "news failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
