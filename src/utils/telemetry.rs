// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 默认过滤规则，HTTP 栈和 HTML 解析器只输出错误
pub const DEFAULT_FILTER: &str =
    "info,webfinder=debug,hyper=error,reqwest=error,h2=error,html5ever=error,tower_http=error";

/// 初始化日志
///
/// `RUST_LOG` 覆盖默认过滤规则；`LOG_FORMAT=json` 时输出 JSON 行。
/// 日志始终写到 stderr
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json_output() {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn json_output() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}
