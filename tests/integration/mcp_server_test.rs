// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::TestBackend;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tokio::net::TcpListener;
use webfinder::presentation::routes;

const SESSION_HEADER: &str = "mcp-session-id";

/// 在随机端口上启动完整的 HTTP 服务，返回 `/mcp` 地址
async fn start_server(backend: &TestBackend) -> String {
    let app = routes::routes(backend.tools());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/mcp", addr)
}

/// streamable HTTP 客户端，初始化后在后续请求中携带会话ID
struct McpSession {
    http: reqwest::Client,
    endpoint: String,
    session_id: Option<String>,
}

impl McpSession {
    async fn open(endpoint: String) -> Self {
        let mut session = Self {
            http: reqwest::Client::new(),
            endpoint,
            session_id: None,
        };

        let response = session
            .post(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {
                    "protocolVersion": "2025-06-18",
                    "capabilities": {},
                    "clientInfo": { "name": "webfinder-tests", "version": "0.0.0" }
                }
            }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        session.session_id = response
            .headers()
            .get(SESSION_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        assert!(session.session_id.is_some());

        let init = read_message(response, 1).await;
        assert_eq!(init["result"]["serverInfo"]["name"], "webfinder");

        let ack = session
            .post(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert_eq!(ack.status(), StatusCode::ACCEPTED);

        session
    }

    async fn post(&self, body: Value) -> Response {
        let mut request = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json, text/event-stream")
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string());
        if let Some(id) = &self.session_id {
            request = request.header(SESSION_HEADER, id);
        }
        request.send().await.unwrap()
    }

    async fn call(&self, id: u64, method: &str, params: Value) -> Value {
        let response = self
            .post(json!({"jsonrpc": "2.0", "id": id, "method": method, "params": params}))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        read_message(response, id).await
    }
}

/// 读取与请求ID对应的 JSON-RPC 消息
///
/// 响应可能是普通 JSON，也可能是 SSE 流；SSE 流不一定立即关闭，找到消息即返回
async fn read_message(mut response: Response, id: u64) -> Value {
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json {
        return response.json().await.unwrap();
    }

    let read = async {
        let mut buffer = String::new();
        while let Some(chunk) = response.chunk().await.unwrap() {
            buffer.push_str(&String::from_utf8_lossy(&chunk));
            let found = buffer
                .lines()
                .filter_map(|line| line.strip_prefix("data:"))
                .filter_map(|data| serde_json::from_str::<Value>(data.trim()).ok())
                .find(|message| message["id"] == json!(id));
            if found.is_some() {
                return found;
            }
        }
        None
    };

    tokio::time::timeout(Duration::from_secs(10), read)
        .await
        .expect("timed out waiting for MCP response")
        .expect("stream ended without a response")
}

#[tokio::test]
async fn mcp_session_round_trip() {
    let backend = TestBackend::start().await;
    let session = McpSession::open(start_server(&backend).await).await;

    let listed = session.call(2, "tools/list", json!({})).await;
    let mut names: Vec<&str> = listed["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["crawl", "google_urls", "news", "search_and_crawl"]);

    let urls = session
        .call(
            3,
            "tools/call",
            json!({"name": "google_urls", "arguments": {"query": "solar", "num_results": 3}}),
        )
        .await;
    let links = urls["result"]["structuredContent"]["result"]
        .as_array()
        .unwrap()
        .clone();
    assert!(!links.is_empty());
    assert!(links
        .iter()
        .all(|l| !l.as_str().unwrap().contains("youtube")));

    let crawl = session
        .call(
            4,
            "tools/call",
            json!({"name": "crawl", "arguments": {"urls": [backend.page_url("solar")]}}),
        )
        .await;
    let docs = &crawl["result"]["structuredContent"]["result"];
    assert_eq!(docs.as_array().unwrap().len(), 1);
    assert!(docs[0].as_str().unwrap().contains("photovoltaic"));

    let news = session
        .call(
            5,
            "tools/call",
            json!({"name": "news", "arguments": {"query": "solar"}}),
        )
        .await;
    assert_eq!(
        news["result"]["structuredContent"]["result"]
            .as_array()
            .unwrap()
            .len(),
        2
    );
}

#[tokio::test]
async fn mcp_prompts_are_listed_and_rendered() {
    let backend = TestBackend::start().await;
    let session = McpSession::open(start_server(&backend).await).await;

    let listed = session.call(2, "prompts/list", json!({})).await;
    assert_eq!(listed["result"]["prompts"].as_array().unwrap().len(), 4);

    let rendered = session
        .call(
            3,
            "prompts/get",
            json!({"name": "news_prompt", "arguments": {"query": "solar"}}),
        )
        .await;
    let text = rendered["result"]["messages"][0]["content"]["text"]
        .as_str()
        .unwrap();
    assert!(text.contains("Search news about: solar"));
}

#[tokio::test]
async fn mcp_reports_invalid_tool_arguments() {
    let backend = TestBackend::start().await;
    let session = McpSession::open(start_server(&backend).await).await;

    let missing = session
        .call(
            2,
            "tools/call",
            json!({"name": "crawl", "arguments": {}}),
        )
        .await;
    assert_eq!(missing["error"]["code"], -32602);

    let unknown = session
        .call(
            3,
            "tools/call",
            json!({"name": "delete_everything", "arguments": {}}),
        )
        .await;
    assert!(unknown["error"]["code"].is_i64());
}

#[tokio::test]
async fn mcp_null_id_is_not_a_notification() {
    let backend = TestBackend::start().await;
    let session = McpSession::open(start_server(&backend).await).await;

    let response = session
        .post(json!({"jsonrpc": "2.0", "id": null, "method": "tools/list"}))
        .await;
    assert_ne!(response.status(), StatusCode::ACCEPTED);
    assert!(!response.status().is_success());
}

#[tokio::test]
async fn mcp_requires_session_after_initialize() {
    let backend = TestBackend::start().await;
    let endpoint = start_server(&backend).await;

    let response = reqwest::Client::new()
        .post(&endpoint)
        .header(ACCEPT, "application/json, text/event-stream")
        .header(CONTENT_TYPE, "application/json")
        .body(json!({"jsonrpc": "2.0", "id": 7, "method": "tools/list"}).to_string())
        .send()
        .await
        .unwrap();
    assert!(!response.status().is_success());
}
