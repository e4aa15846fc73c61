//! 条目草稿缓冲区
//!
//! 打开某个 KVM 的条目视图时新建，提交后或离开时丢弃。

use serde::Serialize;

use kvm_console_provider::CreateEntryRequest;

use crate::bulk::parse_bulk_entries;
use crate::error::{CoreResult, ValidationError};

/// 输入模式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum InputMode {
    /// 逐对输入 name / value
    #[default]
    Pair,
    /// 粘贴 JSON 数组
    BulkJson,
}

/// 一行待提交的条目，name / value 均可单独编辑
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DraftLine {
    pub name: String,
    pub value: String,
}

impl DraftLine {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.value.trim().is_empty() {
            return Err(ValidationError::EmptyValue);
        }
        Ok(())
    }
}

/// 提交时的分拣结果
#[derive(Debug, Default)]
pub struct CommitBatch {
    /// 通过校验的行，保持原顺序
    pub requests: Vec<CreateEntryRequest>,
    /// 未通过校验的行
    pub rejected: Vec<ValidationError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryDraftBuffer {
    mode: InputMode,
    staging: DraftLine,
    bulk_text: String,
    lines: Vec<DraftLine>,
}

impl EntryDraftBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) -> InputMode {
        self.mode = match self.mode {
            InputMode::Pair => InputMode::BulkJson,
            InputMode::BulkJson => InputMode::Pair,
        };
        self.mode
    }

    pub fn staging(&self) -> &DraftLine {
        &self.staging
    }

    pub fn set_staging_name(&mut self, name: impl Into<String>) {
        self.staging.name = name.into();
    }

    pub fn set_staging_value(&mut self, value: impl Into<String>) {
        self.staging.value = value.into();
    }

    pub fn bulk_text(&self) -> &str {
        &self.bulk_text
    }

    pub fn set_bulk_text(&mut self, text: impl Into<String>) {
        self.bulk_text = text.into();
    }

    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 将暂存的一对加入草稿
    ///
    /// name / value 去除首尾空白后都不能为空，否则不改变任何状态。
    pub fn add_pair(&mut self) -> CoreResult<()> {
        self.staging.validate()?;
        let line = DraftLine {
            name: self.staging.name.trim().to_string(),
            value: self.staging.value.trim().to_string(),
        };
        self.lines.push(line);
        self.staging = DraftLine::default();
        Ok(())
    }

    /// 将批量文本展开为草稿行，返回新增行数
    ///
    /// 任一阶段失败时不新增任何行，批量文本保留供修改。
    pub fn import_bulk(&mut self) -> CoreResult<usize> {
        let parsed = parse_bulk_entries(&self.bulk_text)?;
        let added = parsed.len();
        self.lines.extend(
            parsed
                .into_iter()
                .map(|(name, value)| DraftLine { name, value }),
        );
        self.bulk_text.clear();
        Ok(added)
    }

    pub fn edit_line(
        &mut self,
        index: usize,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> CoreResult<()> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(ValidationError::NoSuchLine(index))?;
        line.name = name.into();
        line.value = value.into();
        Ok(())
    }

    pub fn remove_line(&mut self, index: usize) -> CoreResult<DraftLine> {
        if index >= self.lines.len() {
            return Err(ValidationError::NoSuchLine(index).into());
        }
        Ok(self.lines.remove(index))
    }

    /// 重新校验所有行并分拣；不修改缓冲区
    pub fn commit_batch(&self) -> CoreResult<CommitBatch> {
        if self.lines.is_empty() {
            return Err(ValidationError::EmptyDraft.into());
        }

        let mut batch = CommitBatch::default();
        for (i, line) in self.lines.iter().enumerate() {
            match line.validate() {
                Ok(()) => batch.requests.push(CreateEntryRequest::new(
                    line.name.trim(),
                    line.value.trim(),
                )),
                Err(_) => batch.rejected.push(ValidationError::InvalidLine {
                    line: i + 1,
                    name: line.name.clone(),
                }),
            }
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    fn staged(name: &str, value: &str) -> EntryDraftBuffer {
        let mut draft = EntryDraftBuffer::new();
        draft.set_staging_name(name);
        draft.set_staging_value(value);
        draft
    }

    #[test]
    fn add_pair_appends_and_clears_staging() {
        let mut draft = staged(" a ", "1");
        draft.add_pair().unwrap();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].name, "a");
        assert_eq!(draft.staging(), &DraftLine::default());
    }

    #[test]
    fn add_pair_rejects_blank_without_state_change() {
        let mut draft = staged("a", "   ");
        let before = draft.clone();
        let err = draft.add_pair().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::EmptyValue)
        ));
        assert_eq!(draft, before);

        let mut draft = staged("", "1");
        assert!(draft.add_pair().is_err());
        assert!(draft.is_empty());
    }

    #[test]
    fn import_bulk_expands_lines() {
        let mut draft = EntryDraftBuffer::new();
        draft.toggle_mode();
        draft.set_bulk_text(r#"[{"name":"a","value":"1"},{"name":"b","value":"2"}]"#);
        assert_eq!(draft.import_bulk().unwrap(), 2);
        assert_eq!(
            draft.lines(),
            &[
                DraftLine {
                    name: "a".into(),
                    value: "1".into()
                },
                DraftLine {
                    name: "b".into(),
                    value: "2".into()
                },
            ]
        );
        assert!(draft.bulk_text().is_empty());
    }

    #[test]
    fn import_bulk_failure_adds_nothing() {
        let mut draft = EntryDraftBuffer::new();
        draft.set_bulk_text(r#"[{"name":"a"}]"#);
        let err = draft.import_bulk().unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::BulkShape)
        ));
        assert!(draft.is_empty());
        assert_eq!(draft.bulk_text(), r#"[{"name":"a"}]"#);
    }

    #[test]
    fn toggle_mode_flips() {
        let mut draft = EntryDraftBuffer::new();
        assert_eq!(draft.mode(), InputMode::Pair);
        assert_eq!(draft.toggle_mode(), InputMode::BulkJson);
        assert_eq!(draft.toggle_mode(), InputMode::Pair);
    }

    #[test]
    fn edit_and_remove_lines() {
        let mut draft = staged("a", "1");
        draft.add_pair().unwrap();
        draft.set_staging_name("b");
        draft.set_staging_value("2");
        draft.add_pair().unwrap();

        draft.edit_line(0, "a2", "10").unwrap();
        assert_eq!(draft.lines()[0].name, "a2");

        let removed = draft.remove_line(1).unwrap();
        assert_eq!(removed.name, "b");
        assert_eq!(draft.len(), 1);

        assert!(draft.remove_line(5).is_err());
        assert!(draft.edit_line(5, "x", "y").is_err());
    }

    #[test]
    fn commit_batch_partitions_lines() {
        let mut draft = staged("a", "1");
        draft.add_pair().unwrap();
        draft.set_staging_name("b");
        draft.set_staging_value("2");
        draft.add_pair().unwrap();
        draft.edit_line(0, "a", "").unwrap();

        let batch = draft.commit_batch().unwrap();
        assert_eq!(batch.requests, vec![CreateEntryRequest::new("b", "2")]);
        assert_eq!(
            batch.rejected,
            vec![ValidationError::InvalidLine {
                line: 1,
                name: "a".into()
            }]
        );
    }

    #[test]
    fn commit_empty_draft_is_rejected() {
        let draft = EntryDraftBuffer::new();
        assert!(matches!(
            draft.commit_batch(),
            Err(CoreError::Validation(ValidationError::EmptyDraft))
        ));
    }
}
