// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 新闻文章
///
/// 标题和URL都不为空；缺少任一字段的原始记录会被丢弃
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsArticle {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// 新闻提供方返回的原始记录
///
/// 提供方的所有字段都可能为 `null`
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewsArticle {
    /// 从原始记录构建文章
    ///
    /// 标题或URL缺失（或为空）时返回 `None`，描述缺失时默认为空字符串
    pub fn from_raw(raw: RawArticle) -> Option<Self> {
        let title = raw.title.filter(|t| !t.is_empty())?;
        let url = raw.url.filter(|u| !u.is_empty())?;
        Some(Self {
            title,
            url,
            description: raw.description.unwrap_or_default(),
        })
    }
}
