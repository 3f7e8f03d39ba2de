// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::news_article::RawArticle;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("News API key is not configured")]
    MissingApiKey,
    #[error("News request failed: {0}")]
    RequestFailed(String),
    #[error("News API error ({status}): {message}")]
    ApiError { status: u16, message: String },
    #[error("Malformed news response: {0}")]
    MalformedResponse(String),
}

/// 新闻提供方
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// 查询与 `query` 相关的原始新闻记录
    async fn fetch_articles(&self, query: &str) -> Result<Vec<RawArticle>, NewsError>;

    fn name(&self) -> &'static str;
}
