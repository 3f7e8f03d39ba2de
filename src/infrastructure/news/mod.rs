// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 新闻提供方实现
pub mod newsapi;

pub use newsapi::NewsApiClient;
