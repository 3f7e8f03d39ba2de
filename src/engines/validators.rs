// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::engines::traits::EngineError;
use std::net::IpAddr;
use tokio::net::lookup_host;
use url::Url;

/// 校验待抓取的 URL
///
/// 只接受 http/https；`allow_private_hosts` 为 false 时，
/// 解析出的任一地址为私有、环回或链路本地地址即拒绝 (SSRF)
pub async fn validate_url(url_str: &str, allow_private_hosts: bool) -> Result<Url, EngineError> {
    let invalid = |reason: String| EngineError::InvalidUrl {
        url: url_str.to_string(),
        reason,
    };

    let url = Url::parse(url_str).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    let host = url
        .host_str()
        .ok_or_else(|| invalid("missing host".to_string()))?
        .to_string();

    if allow_private_hosts {
        return Ok(url);
    }

    if host.eq_ignore_ascii_case("localhost") {
        return Err(invalid("localhost is not allowed".to_string()));
    }

    // lookup_host 需要 host:port
    let port = url.port_or_known_default().unwrap_or(80);
    let host_for_lookup = host.trim_start_matches('[').trim_end_matches(']');
    let addrs = lookup_host((host_for_lookup, port))
        .await
        .map_err(|e| invalid(format!("DNS lookup failed: {}", e)))?;

    for addr in addrs {
        if is_private_ip(addr.ip()) {
            return Err(invalid(format!(
                "private address {} is not allowed",
                addr.ip()
            )));
        }
    }

    Ok(url)
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_private()
                || v4.is_loopback()
                || v4.is_link_local()
                || v4.is_multicast()
                || v4.is_unspecified()
        }
        IpAddr::V6(v6) => {
            let first = v6.segments()[0];
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7
                || (first & 0xfe00) == 0xfc00
                // fe80::/10
                || (first & 0xffc0) == 0xfe80
                || v6.is_multicast()
        }
    }
}
