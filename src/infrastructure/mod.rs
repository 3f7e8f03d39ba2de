// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 对外部 HTTP API 的具体封装，实现领域层定义的提供方接口：
/// - 新闻（news）：NewsAPI.org 客户端
/// - 搜索（search）：Google Custom Search 客户端
pub mod news;
pub mod search;
