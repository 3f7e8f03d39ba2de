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

use rmcp::{
    handler::server::{tool::ToolRouter, wrapper::Parameters, ServerHandler},
    model::{
        CallToolResult, GetPromptRequestParam, GetPromptResult, Implementation,
        ListPromptsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, ErrorData as McpError, RoleServer,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::tools::WebFinderTools;
use crate::presentation::mcp::prompts;

pub const SERVER_NAME: &str = "webfinder";
pub const DEFAULT_NUM_RESULTS: u32 = 5;

fn default_num_results() -> u32 {
    DEFAULT_NUM_RESULTS
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SearchArgs {
    /// Search query
    pub query: String,
    /// Number of results to request
    #[serde(default = "default_num_results")]
    pub num_results: u32,
    /// Drop YouTube results
    #[serde(default = "default_true")]
    pub exclude_youtube: bool,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CrawlArgs {
    /// URLs to fetch
    pub urls: Vec<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NewsArgs {
    /// News topic
    pub query: String,
}

/// MCP 服务处理器
///
/// 把 `WebFinderTools` 暴露为 MCP 工具和提示，由 rmcp 负责会话和传输
#[derive(Clone)]
pub struct WebFinderServer {
    tools: Arc<WebFinderTools>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl WebFinderServer {
    pub fn new(tools: Arc<WebFinderTools>) -> Self {
        Self {
            tools,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Search Google and return the URLs of the most relevant results.")]
    async fn google_urls(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "google_urls", query = %args.query, "Calling tool");
        let urls = self
            .tools
            .google_urls(&args.query, args.num_results, args.exclude_youtube)
            .await;
        Ok(structured_result(urls))
    }

    #[tool(description = "Fetch the given URLs and return their cleaned markdown content.")]
    async fn crawl(
        &self,
        Parameters(args): Parameters<CrawlArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "crawl", urls = args.urls.len(), "Calling tool");
        let docs = self.tools.crawl(&args.urls).await;
        Ok(structured_result(docs))
    }

    #[tool(
        description = "Search Google, fetch the top results and return their content narrowed to the query."
    )]
    async fn search_and_crawl(
        &self,
        Parameters(args): Parameters<SearchArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "search_and_crawl", query = %args.query, "Calling tool");
        let docs = self
            .tools
            .search_and_crawl(&args.query, args.num_results, args.exclude_youtube)
            .await;
        Ok(structured_result(docs))
    }

    #[tool(description = "Return recent news articles about a topic.")]
    async fn news(
        &self,
        Parameters(args): Parameters<NewsArgs>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = "news", query = %args.query, "Calling tool");
        let articles = self.tools.news(&args.query).await;
        Ok(structured_result(articles))
    }
}

/// 工具输出同时作为文本内容和结构化内容返回
///
/// 结构化内容必须是对象，列表放在 `result` 字段下
fn structured_result<T: Serialize>(items: Vec<T>) -> CallToolResult {
    let output = serde_json::to_value(items).unwrap_or_else(|_| Value::Array(Vec::new()));
    CallToolResult::structured(json!({ "result": output }))
}

#[tool_handler]
impl ServerHandler for WebFinderServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Web search, page crawling and news retrieval. Results are cleaned markdown."
                    .into(),
            ),
            ..Default::default()
        }
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(prompts::prompt_list()?))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        debug!(prompt = %request.name, "Rendering prompt");
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        prompts::render_prompt(&request.name, &arguments)
    }
}

#[cfg(test)]
#[path = "server_test.rs"]
mod tests;
