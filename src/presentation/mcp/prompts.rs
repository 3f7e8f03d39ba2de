// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::mcp::server::DEFAULT_NUM_RESULTS;
use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use rmcp::ErrorData as McpError;
use serde_json::{json, Map, Value};

/// 提示模板目录
pub fn prompt_list() -> Result<Vec<Prompt>, McpError> {
    serde_json::from_value(prompt_definitions())
        .map_err(|e| McpError::internal_error(format!("invalid prompt catalog: {}", e), None))
}

fn prompt_definitions() -> Value {
    json!([
        {
            "name": "google_urls_prompt",
            "description": "Prompt to get URLs from a Google search.",
            "arguments": [
                { "name": "query", "required": true },
                { "name": "num_results", "required": false }
            ]
        },
        {
            "name": "crawl_prompt",
            "description": "Prompt to crawl and extract content from URLs.",
            "arguments": [
                { "name": "urls", "required": true }
            ]
        },
        {
            "name": "search_and_crawl_prompt",
            "description": "Prompt to search and crawl content from Google results.",
            "arguments": [
                { "name": "query", "required": true },
                { "name": "num_results", "required": false }
            ]
        },
        {
            "name": "news_prompt",
            "description": "Prompt to get news about a topic.",
            "arguments": [
                { "name": "query", "required": true }
            ]
        }
    ])
}

/// 渲染 `prompts/get`
///
/// 每个提示只生成一条用户消息
pub fn render_prompt(name: &str, arguments: &Value) -> Result<GetPromptResult, McpError> {
    let empty = Map::new();
    let args = match arguments {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => return Err(invalid_params("prompt arguments must be an object")),
    };

    let (description, text) = match name {
        "google_urls_prompt" => {
            let query = required_str(args, "query")?;
            let num_results = num_results(args)?;
            (
                "Google search for URLs",
                format!(
                    "Search Google for: {query}\n\n\
                     Get the {num_results} most relevant URLs from the search.\n\
                     Present the results with the links found."
                ),
            )
        }
        "crawl_prompt" => {
            let urls = url_list(args)?;
            (
                "Crawl URLs",
                format!(
                    "Extract the content of the following URLs:\n{}\n\n\
                     Convert the content to markdown and present it.",
                    urls.join(", ")
                ),
            )
        }
        "search_and_crawl_prompt" => {
            let query = required_str(args, "query")?;
            let num_results = num_results(args)?;
            (
                "Search and crawl",
                format!(
                    "Search Google for: {query}\n\n\
                     Get the {num_results} most relevant pages and extract their content.\n\
                     Present the content of each page as clean markdown."
                ),
            )
        }
        "news_prompt" => {
            let query = required_str(args, "query")?;
            (
                "News about a topic",
                format!(
                    "Search news about: {query}\n\n\
                     Get the most recent news and present them with:\n\
                     - Titles\n\
                     - URL\n\
                     - Description"
                ),
            )
        }
        other => {
            return Err(invalid_params(format!("unknown prompt '{}'", other)))
        }
    };

    Ok(GetPromptResult {
        description: Some(description.to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    })
}

fn invalid_params(message: impl Into<String>) -> McpError {
    let message: String = message.into();
    McpError::invalid_params(message, None)
}

fn required_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| invalid_params(format!("missing string argument '{}'", key)))
}

/// 提示参数按协议都以字符串传递，这里也接受数字
fn num_results(args: &Map<String, Value>) -> Result<u32, McpError> {
    match args.get("num_results") {
        None | Some(Value::Null) => Ok(DEFAULT_NUM_RESULTS),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| invalid_params("num_results must be a positive integer")),
        Some(Value::String(s)) => s
            .trim()
            .parse::<u32>()
            .map_err(|_| invalid_params("num_results must be a positive integer")),
        Some(_) => Err(invalid_params(
            "num_results must be a positive integer",
        )),
    }
}

/// 单个 URL 视为只含一个元素的列表
fn url_list(args: &Map<String, Value>) -> Result<Vec<String>, McpError> {
    match args.get("urls") {
        Some(Value::String(url)) => Ok(vec![url.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| invalid_params("urls must contain strings"))
            })
            .collect(),
        _ => Err(invalid_params(
            "missing argument 'urls' (string or list of strings)",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{ErrorCode, PromptMessageContent};

    fn message_text(rendered: &GetPromptResult) -> &str {
        match &rendered.messages[0].content {
            PromptMessageContent::Text { text } => text,
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[test]
    fn test_prompt_list_names() {
        let names: Vec<String> = prompt_list()
            .unwrap()
            .into_iter()
            .map(|p| p.name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "google_urls_prompt",
                "crawl_prompt",
                "search_and_crawl_prompt",
                "news_prompt"
            ]
        );
    }

    #[test]
    fn test_google_urls_prompt_defaults_num_results() {
        let rendered = render_prompt("google_urls_prompt", &json!({"query": "rust"})).unwrap();
        assert_eq!(rendered.messages.len(), 1);
        assert_eq!(rendered.messages[0].role, PromptMessageRole::User);
        assert!(message_text(&rendered).contains("Search Google for: rust"));
        assert!(message_text(&rendered).contains("5 most relevant URLs"));
    }

    #[test]
    fn test_num_results_as_string() {
        let rendered = render_prompt(
            "search_and_crawl_prompt",
            &json!({"query": "solar", "num_results": "3"}),
        )
        .unwrap();
        assert!(message_text(&rendered).contains("3 most relevant pages"));
    }

    #[test]
    fn test_crawl_prompt_accepts_string_or_list() {
        let single = render_prompt("crawl_prompt", &json!({"urls": "https://a.test"})).unwrap();
        assert!(message_text(&single).contains("https://a.test"));

        let many = render_prompt(
            "crawl_prompt",
            &json!({"urls": ["https://a.test", "https://b.test"]}),
        )
        .unwrap();
        assert!(message_text(&many).contains("https://a.test, https://b.test"));
    }

    #[test]
    fn test_prompt_errors() {
        assert_eq!(
            render_prompt("news_prompt", &json!({})).unwrap_err().code,
            ErrorCode::INVALID_PARAMS
        );
        assert_eq!(
            render_prompt("nope", &Value::Null).unwrap_err().code,
            ErrorCode::INVALID_PARAMS
        );
    }
}
