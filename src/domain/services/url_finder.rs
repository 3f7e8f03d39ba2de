// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::search_result::SearchResult;
use crate::domain::search::engine::{SearchEngine, SearchError};
use std::sync::Arc;
use tracing::debug;

/// YouTube 的各个主机名，对完整 URL 做不区分大小写的子串匹配
pub const YOUTUBE_HOSTS: &[&str] = &[
    "youtube.com",
    "youtu.be",
    "www.youtube.com",
    "m.youtube.com",
    "music.youtube.com",
];

/// 追加到查询上的站点排除运算符
const YOUTUBE_EXCLUSION_OPERATORS: &str = "-site:youtube.com -site:youtu.be";

/// URL 查找服务
///
/// 包装搜索提供方，并按需排除 YouTube 结果
pub struct UrlFinder {
    engine: Arc<dyn SearchEngine>,
}

impl UrlFinder {
    pub fn new(engine: Arc<dyn SearchEngine>) -> Self {
        Self { engine }
    }

    /// 执行搜索
    ///
    /// `exclude_youtube` 为 true 时同时使用两种手段：查询中追加排除运算符，
    /// 以及对返回结果做主机名过滤（运算符并不总能完全生效）
    ///
    /// # 参数
    ///
    /// * `query` - 原始查询
    /// * `num_results` - 期望的结果数量，至少为 1
    /// * `exclude_youtube` - 是否排除 YouTube
    pub async fn find(
        &self,
        query: &str,
        num_results: u32,
        exclude_youtube: bool,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".to_string()));
        }

        let effective_query = if exclude_youtube {
            with_youtube_exclusion(query)
        } else {
            query.to_string()
        };
        let limit = num_results.max(1);

        debug!(
            engine = self.engine.name(),
            query = %effective_query,
            limit,
            "Dispatching search"
        );
        let results = self.engine.search(&effective_query, limit).await?;

        if !exclude_youtube {
            return Ok(results);
        }

        let before = results.len();
        let kept: Vec<SearchResult> = results
            .into_iter()
            .filter(|r| !is_youtube_url(&r.link))
            .collect();
        if kept.len() < before {
            debug!(removed = before - kept.len(), "Filtered YouTube results");
        }
        Ok(kept)
    }
}

/// 在查询末尾追加 YouTube 排除运算符
pub fn with_youtube_exclusion(query: &str) -> String {
    format!("{} {}", query.trim(), YOUTUBE_EXCLUSION_OPERATORS)
}

/// 判断 URL 是否指向 YouTube
pub fn is_youtube_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    YOUTUBE_HOSTS.iter().any(|host| lower.contains(host))
}

#[cfg(test)]
#[path = "url_finder_test.rs"]
mod tests;
