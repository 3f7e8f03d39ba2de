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

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use webfinder::application::tools::WebFinderTools;
use webfinder::config::settings::Settings;
use webfinder::presentation::routes;
use webfinder::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env before anything reads the environment
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // 2. Initialize logging
    telemetry::init_telemetry();
    info!("Starting webfinder...");
    if !dotenv_loaded {
        info!("No .env file found, using process environment");
    }

    // 3. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");
    if settings.google_search.api_key.is_none() || settings.google_search.cx.is_none() {
        warn!("Google Search credentials are not configured; search tools will return no results");
    }
    if settings.news.api_key.is_none() {
        warn!("NEWS_API_KEY is not configured; the news tool will return no results");
    }

    // 4. Initialize providers and tools
    let tools = Arc::new(WebFinderTools::from_settings(&settings)?);
    info!(
        max_concurrency = settings.crawler.max_concurrency,
        "Tools initialized"
    );

    // 5. Start HTTP server
    let app = routes::routes(tools);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {} (MCP endpoint: /mcp)", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
