// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// MCP (Model Context Protocol) 协议支持
///
/// - 服务（server）：rmcp 工具路由与服务处理器
/// - 提示（prompts）：提示模板
pub mod prompts;
pub mod server;
