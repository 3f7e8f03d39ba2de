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
use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// URL 不合法或被拒绝
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 抓取引擎特质
///
/// 给定一组URL，为每个URL返回一条 [`CrawlOutcome`]。
/// 并发和背压由实现自行处理；单个URL的失败体现在对应结果中，
/// 只有整个批次无法执行时才返回 `Err`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrawlEngine: Send + Sync {
    /// 批量抓取
    async fn crawl_many(&self, urls: &[String]) -> Result<Vec<CrawlOutcome>, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
