//! 条目导出
//!
//! 导出格式与批量输入一致：`[{"name": ..., "value": ...}]`。

use serde::Serialize;

use kvm_console_provider::Entry;

use crate::error::{CoreError, CoreResult};

/// 未选择 KVM 时的默认文件名
pub const DEFAULT_EXPORT_FILE_NAME: &str = "entries.json";

/// 待写出的导出文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportedEntries {
    pub file_name: String,
    pub content: String,
    pub count: usize,
}

/// `{environment}-{kvm}-entries.json`，缺少任一级时退回 `entries.json`
///
/// 路径分隔符替换为 `_`，文件名只能落在导出目录内。
pub fn export_file_name(environment: Option<&str>, kvm: Option<&str>) -> String {
    match (environment, kvm) {
        (Some(env), Some(kvm)) => {
            let raw = format!("{env}-{kvm}-entries.json");
            raw.replace(['/', '\\'], "_")
        }
        _ => DEFAULT_EXPORT_FILE_NAME.to_string(),
    }
}

pub fn export_entries(
    entries: &[Entry],
    environment: Option<&str>,
    kvm: Option<&str>,
) -> CoreResult<ExportedEntries> {
    let content =
        serde_json::to_string_pretty(entries).map_err(|e| CoreError::Export(e.to_string()))?;
    Ok(ExportedEntries {
        file_name: export_file_name(environment, kvm),
        content,
        count: entries.len(),
    })
}

/// 解析导出文档
pub fn parse_exported(content: &str) -> CoreResult<Vec<Entry>> {
    serde_json::from_str(content).map_err(|e| CoreError::Export(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bulk::parse_bulk_entries;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("alpha", "1"),
            Entry::new("beta", r#"{"nested":"json"}"#),
            Entry::new("gamma", "multi\nline"),
        ]
    }

    #[test]
    fn file_name_by_selection() {
        assert_eq!(
            export_file_name(Some("prod"), Some("settings")),
            "prod-settings-entries.json"
        );
        assert_eq!(export_file_name(Some("prod"), None), "entries.json");
        assert_eq!(export_file_name(None, None), "entries.json");
        assert_eq!(
            export_file_name(Some("prod"), Some("a/b")),
            "prod-a_b-entries.json"
        );
    }

    #[test]
    fn export_round_trips_in_order() {
        let entries = sample();
        let exported = export_entries(&entries, Some("prod"), Some("settings")).unwrap();
        assert_eq!(exported.count, 3);
        assert_eq!(parse_exported(&exported.content).unwrap(), entries);
    }

    #[test]
    fn export_is_accepted_as_bulk_input() {
        let entries = vec![Entry::new("a", "1"), Entry::new("b", "two")];
        let exported = export_entries(&entries, None, None).unwrap();
        let parsed = parse_bulk_entries(&exported.content).unwrap();
        assert_eq!(
            parsed,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two".to_string())
            ]
        );
    }

    #[test]
    fn parse_exported_rejects_garbage() {
        assert!(matches!(
            parse_exported("not json"),
            Err(CoreError::Export(_))
        ));
    }
}
