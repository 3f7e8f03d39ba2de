// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 内容过滤（content_filter）：把抓取到的 markdown 清洗成正文
/// - URL 查找（url_finder）：包装搜索提供方并排除 YouTube
/// - 爬取服务（crawl_service）：批量抓取并清洗页面
/// - 新闻服务（news_service）：获取并整理新闻文章
pub mod content_filter;
pub mod crawl_service;
pub mod news_service;
pub mod url_finder;
