// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 把领域服务组合成对外暴露的工具，并把内部错误收敛为空结果
pub mod tools;

pub use tools::WebFinderTools;
