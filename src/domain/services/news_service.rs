// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::news_article::NewsArticle;
use crate::domain::news::provider::{NewsError, NewsProvider};
use std::sync::Arc;
use tracing::debug;

/// 新闻服务
///
/// 调用新闻提供方并把原始记录映射为 [`NewsArticle`]，
/// 缺少标题或 URL 的记录会被丢弃
pub struct NewsService {
    provider: Arc<dyn NewsProvider>,
}

impl NewsService {
    pub fn new(provider: Arc<dyn NewsProvider>) -> Self {
        Self { provider }
    }

    pub async fn news(&self, query: &str) -> Result<Vec<NewsArticle>, NewsError> {
        let raw = self.provider.fetch_articles(query).await?;
        let total = raw.len();
        let articles: Vec<NewsArticle> = raw.into_iter().filter_map(NewsArticle::from_raw).collect();
        debug!(
            provider = self.provider.name(),
            total,
            kept = articles.len(),
            "Mapped news articles"
        );
        Ok(articles)
    }
}
