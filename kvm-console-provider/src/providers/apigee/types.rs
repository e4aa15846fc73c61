//! Apigee API 类型定义

use serde::{Deserialize, Serialize};

/// Google API 错误响应
/// `{"error": {"code": 404, "message": "...", "status": "NOT_FOUND"}}`
#[derive(Debug, Deserialize)]
pub struct ApigeeErrorResponse {
    pub error: ApigeeErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ApigeeErrorBody {
    #[allow(dead_code)]
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// KVM 条目（请求与响应共用）
#[derive(Debug, Serialize, Deserialize)]
pub struct ApigeeEntry {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// 条目列表分页响应
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesResponse {
    #[serde(default)]
    pub key_value_entries: Vec<ApigeeEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}
