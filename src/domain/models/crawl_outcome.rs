// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 单个URL的抓取结果
///
/// 抓取引擎为每个请求的URL产出一条记录，作为内容过滤器的输入
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// 目标URL
    pub url: String,
    /// 是否抓取成功
    pub success: bool,
    /// 提取出的原始 markdown
    pub markdown: Option<String>,
    /// 失败原因
    pub error: Option<String>,
}

impl CrawlOutcome {
    /// 创建成功的抓取结果
    pub fn succeeded(url: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: true,
            markdown: Some(markdown.into()),
            error: None,
        }
    }

    /// 创建失败的抓取结果
    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            success: false,
            markdown: None,
            error: Some(error.into()),
        }
    }

    /// 返回可用的 markdown 内容
    ///
    /// 失败的结果或空内容返回 `None`
    pub fn usable_markdown(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.markdown.as_deref().filter(|m| !m.is_empty())
    }
}
