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

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、搜索、新闻、抓取和内容过滤等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// Google 可编程搜索配置
    pub google_search: GoogleSearchSettings,
    /// 新闻 API 配置
    pub news: NewsSettings,
    /// 页面抓取配置
    pub crawler: CrawlerSettings,
    /// 内容过滤配置
    pub filter: FilterSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// Google 可编程搜索配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleSearchSettings {
    /// API 密钥
    pub api_key: Option<String>,
    /// 搜索引擎 ID (cx)
    pub cx: Option<String>,
    /// API 端点
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 新闻 API 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct NewsSettings {
    /// API 密钥，未配置时新闻工具返回空结果
    pub api_key: Option<String>,
    /// API 根地址
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

/// 页面抓取配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerSettings {
    /// 单个页面的请求超时时间（秒）
    pub timeout_secs: u64,
    /// 同时进行的最大请求数
    pub max_concurrency: usize,
    /// User-Agent
    pub user_agent: String,
    /// 是否允许抓取私有/环回地址
    pub allow_private_hosts: bool,
}

/// 内容过滤配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct FilterSettings {
    /// 清洗后文档需超过的最小字符数
    pub min_content_chars: usize,
}

impl GoogleSearchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl NewsSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl CrawlerSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次加载默认值、`config/default`、`config/{APP_ENVIRONMENT}`、
    /// `WEBFINDER__*` 环境变量，最后是 `GOOGLE_API_KEY`、`GOOGLE_CSE_ID`、
    /// `NEWS_API_KEY`、`HOST`、`PORT` 这些常用变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("WEBFINDER").separator("__"))
            .set_override_option("google_search.api_key", non_empty_env("GOOGLE_API_KEY"))?
            .set_override_option("google_search.cx", non_empty_env("GOOGLE_CSE_ID"))?
            .set_override_option("news.api_key", non_empty_env("NEWS_API_KEY"))?
            .set_override_option("server.host", non_empty_env("HOST"))?
            .set_override_option(
                "server.port",
                non_empty_env("PORT").and_then(|p| p.parse::<i64>().ok()),
            )?
            .build()?
            .try_deserialize()
    }

    /// 只包含默认值的配置，不读取文件和环境变量
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // 默认监听所有地址的 8080 端口
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default(
                "google_search.base_url",
                "https://www.googleapis.com/customsearch/v1",
            )?
            .set_default("google_search.timeout_secs", 30)?
            .set_default("news.base_url", "https://newsapi.org")?
            .set_default("news.timeout_secs", 10)?
            .set_default("crawler.timeout_secs", 30)?
            .set_default("crawler.max_concurrency", 5)?
            .set_default(
                "crawler.user_agent",
                "Mozilla/5.0 (compatible; webfinder/0.1; +https://github.com/Kirky-X)",
            )?
            .set_default("crawler.allow_private_hosts", false)?
            .set_default("filter.min_content_chars", 100)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
