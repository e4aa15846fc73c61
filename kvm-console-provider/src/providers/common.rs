//! Provider 公共工具函数

use std::time::Duration;

use reqwest::Client;

use crate::error::{ProviderError, Result};

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// 创建带超时配置的 HTTP Client
///
/// `timeout` 作用于整个请求（连接 + 读取），连接阶段另有上限。
pub fn create_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .connect_timeout(timeout.min(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)))
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

// ============ 路径处理 ============

/// 将名称编码为单个 URL 路径段（先去除首尾空白）
pub fn path_segment(name: &str) -> String {
    urlencoding::encode(name.trim()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_trims_and_encodes() {
        assert_eq!(path_segment("  api key "), "api%20key");
        assert_eq!(path_segment("a/b"), "a%2Fb");
        assert_eq!(path_segment("plain"), "plain");
    }

    #[test]
    fn http_client_builds() {
        assert!(create_http_client(Duration::from_millis(2000)).is_ok());
    }
}
