// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型
///
/// 单次工具调用内创建和丢弃的实体，不做持久化
pub mod crawl_outcome;
pub mod keyword_set;
pub mod news_article;
pub mod search_result;
