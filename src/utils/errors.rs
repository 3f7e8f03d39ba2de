// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::news::provider::NewsError;
use crate::domain::search::engine::SearchError;
use crate::engines::traits::EngineError;
use thiserror::Error;

/// 工具层错误类型
///
/// 汇总各个外部提供方的错误；对外的工具接口最终把它转换成空结果
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("搜索失败: {0}")]
    Search(#[from] SearchError),

    #[error("抓取失败: {0}")]
    Engine(#[from] EngineError),

    #[error("新闻获取失败: {0}")]
    News(#[from] NewsError),
}
