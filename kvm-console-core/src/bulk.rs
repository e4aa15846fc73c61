//! 批量 JSON 条目解析
//!
//! 两阶段校验：先用正则检查整体形状，再做结构化解析和字段校验。
//! 形状检查能更早拒绝明显错误的输入，结构化解析兜住正则放过的情况
//! （例如非法转义序列）。

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::error::ValidationError;

/// JSON 字符串字面量
const STRING: &str = r#""(?:[^"\\]|\\.)*""#;

/// `{"name": <string>, "value": <string|integer>}`，键顺序固定
static BULK_SHAPE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let object = format!(r#"\{{\s*"name"\s*:\s*{STRING}\s*,\s*"value"\s*:\s*(?:{STRING}|-?\d+)\s*\}}"#);
    let pattern = format!(r"^\s*\[\s*{object}(?:\s*,\s*{object})*\s*\]\s*$");
    Regex::new(&pattern).ok()
});

#[derive(Deserialize)]
#[serde(untagged)]
enum BulkValue {
    Text(String),
    Integer(i64),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BulkItem {
    name: String,
    value: BulkValue,
}

/// 阶段一：形状检查
pub fn matches_shape(input: &str) -> bool {
    match BULK_SHAPE.as_ref() {
        Some(re) => re.is_match(input),
        None => {
            log::error!("Bulk shape pattern failed to compile, relying on structural parse");
            true
        }
    }
}

/// 解析批量输入为 `(name, value)` 列表，保持输入顺序
///
/// 整数值转为十进制字符串。任一元素无效则整体拒绝。
pub fn parse_bulk_entries(input: &str) -> Result<Vec<(String, String)>, ValidationError> {
    if !matches_shape(input) {
        return Err(ValidationError::BulkShape);
    }

    let items: Vec<BulkItem> =
        serde_json::from_str(input).map_err(|e| ValidationError::BulkParse(e.to_string()))?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let value = match item.value {
                BulkValue::Text(s) => s,
                BulkValue::Integer(n) => n.to_string(),
            };
            let name = item.name.trim().to_string();
            let value = value.trim().to_string();
            if name.is_empty() || value.is_empty() {
                return Err(ValidationError::BulkEmptyField { index });
            }
            Ok((name, value))
        })
        .collect()
}
