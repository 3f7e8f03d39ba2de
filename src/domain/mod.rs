// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：单次调用内的实体
/// - 提供方接口（search、news）：外部服务的抽象
/// - 服务（services）：内容过滤和编排逻辑
///
/// 领域层不依赖于任何具体的外部实现。
pub mod models;
pub mod news;
pub mod search;
pub mod services;
