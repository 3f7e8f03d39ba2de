// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 把领域服务组合成对外的工具
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体、内容过滤管线和提供方接口
pub mod domain;

/// 引擎模块
///
/// 实现网页抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成：搜索 API 和新闻 API
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由和 MCP 处理器
pub mod presentation;

/// 工具模块
///
/// 提供通用的错误类型和日志初始化
pub mod utils;
