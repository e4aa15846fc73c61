//! 弹窗/对话框状态

use kvm_console_core::{Notice, NoticeLevel};

/// 删除对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Kvm(String),
    Entry(String),
}

impl DeleteTarget {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Kvm(_) => "key-value map",
            Self::Entry(_) => "entry",
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Kvm(name) | Self::Entry(name) => name,
        }
    }
}

/// 双字段输入框的焦点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PairField {
    #[default]
    Name,
    Value,
}

impl PairField {
    pub fn toggle(self) -> Self {
        match self {
            Self::Name => Self::Value,
            Self::Value => Self::Name,
        }
    }
}

/// 弹窗类型
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// 新建 KVM
    CreateKvm { name: String },

    /// 删除确认
    ConfirmDelete {
        target: DeleteTarget,
        /// true = 焦点在“确认”按钮
        confirm_focused: bool,
    },

    /// 暂存一对 name / value（草稿行新增或编辑）
    PairInput {
        /// `None` 表示新增，`Some(i)` 表示编辑第 i 行
        line: Option<usize>,
        name: String,
        value: String,
        field: PairField,
    },

    /// 粘贴批量 JSON
    BulkInput { text: String },

    /// 查看条目完整内容
    EntryDetail { name: String, value: String },

    /// 需要用户确认的提示
    Notices { notices: Vec<Notice> },

    Help,
}

impl Modal {
    /// 正在接收输入的弹窗，关掉会丢失未提交的文字
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            Self::CreateKvm { .. } | Self::PairInput { .. } | Self::BulkInput { .. }
        )
    }
}

/// 弹窗状态容器
#[derive(Debug, Default)]
pub struct ModalState {
    /// 当前活动的弹窗
    pub active: Option<Modal>,
    /// 输入弹窗打开期间到达的提示，弹窗关闭后再展示
    pending_notices: Vec<Notice>,
}

impl ModalState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, modal: Modal) {
        self.active = Some(modal);
    }

    /// 关闭弹窗；有排队的提示时换成提示弹窗
    pub fn close(&mut self) {
        self.active = None;
        self.flush_pending();
    }

    /// 取走当前弹窗，语义同 [`close`](Self::close)
    pub fn take(&mut self) -> Option<Modal> {
        let modal = self.active.take();
        self.flush_pending();
        modal
    }

    fn flush_pending(&mut self) {
        if !self.pending_notices.is_empty() {
            let notices = std::mem::take(&mut self.pending_notices);
            self.active = Some(Modal::Notices { notices });
        }
    }

    pub fn pending_notice_count(&self) -> usize {
        self.pending_notices.len()
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn show_create_kvm(&mut self) {
        self.show(Modal::CreateKvm {
            name: String::new(),
        });
    }

    pub fn show_confirm_delete(&mut self, target: DeleteTarget) {
        self.show(Modal::ConfirmDelete {
            target,
            confirm_focused: false,
        });
    }

    pub fn show_pair_input(&mut self, line: Option<usize>, name: &str, value: &str) {
        self.show(Modal::PairInput {
            line,
            name: name.to_string(),
            value: value.to_string(),
            field: PairField::Name,
        });
    }

    pub fn show_bulk_input(&mut self, text: &str) {
        self.show(Modal::BulkInput {
            text: text.to_string(),
        });
    }

    pub fn show_entry_detail(&mut self, name: &str, value: &str) {
        self.show(Modal::EntryDetail {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// 追加到已打开的提示弹窗，否则新开一个。
    ///
    /// 输入弹窗打开时不打断输入，提示先排队；返回 false 表示已排队。
    pub fn show_notices(&mut self, mut notices: Vec<Notice>) -> bool {
        match &mut self.active {
            Some(Modal::Notices { notices: existing }) => existing.append(&mut notices),
            Some(modal) if modal.is_input() => {
                self.pending_notices.append(&mut notices);
                return false;
            }
            _ => self.show(Modal::Notices { notices }),
        }
        true
    }

    pub fn show_help(&mut self) {
        self.show(Modal::Help);
    }

    /// 当前提示弹窗里最高的级别
    pub fn notice_level(&self) -> Option<NoticeLevel> {
        match &self.active {
            Some(Modal::Notices { notices }) => notices.iter().map(|n| n.level).max(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_accumulate_in_open_modal() {
        let mut modal = ModalState::new();
        modal.show_notices(vec![Notice::error("first")]);
        modal.show_notices(vec![Notice::warning("second")]);

        let Some(Modal::Notices { notices }) = &modal.active else {
            panic!("expected notices modal");
        };
        assert_eq!(notices.len(), 2);
        assert_eq!(modal.notice_level(), Some(NoticeLevel::Error));
    }

    #[test]
    fn notices_replace_read_only_modals() {
        let mut modal = ModalState::new();
        modal.show_help();
        assert!(modal.show_notices(vec![Notice::error("boom")]));
        assert!(matches!(modal.active, Some(Modal::Notices { .. })));

        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn notices_wait_behind_input_dialog() {
        let mut modal = ModalState::new();
        modal.show_bulk_input(r#"[{"name":"next","value":"half"#);
        assert!(!modal.show_notices(vec![Notice::error("first")]));
        let blocking = Notice {
            level: NoticeLevel::Blocking,
            message: "second".into(),
        };
        assert!(!modal.show_notices(vec![blocking]));

        assert_eq!(
            modal.active,
            Some(Modal::BulkInput {
                text: r#"[{"name":"next","value":"half"#.to_string()
            })
        );
        assert_eq!(modal.pending_notice_count(), 2);

        modal.close();
        let Some(Modal::Notices { notices }) = &modal.active else {
            panic!("queued notices should open after the dialog closes");
        };
        assert_eq!(notices.len(), 2);
        assert_eq!(modal.pending_notice_count(), 0);
        assert_eq!(modal.notice_level(), Some(NoticeLevel::Blocking));
    }

    #[test]
    fn taking_input_dialog_surfaces_queued_notices() {
        let mut modal = ModalState::new();
        modal.show_create_kvm();
        modal.show_notices(vec![Notice::error("boom")]);

        let taken = modal.take();
        assert!(matches!(taken, Some(Modal::CreateKvm { .. })));
        assert!(matches!(modal.active, Some(Modal::Notices { .. })));
    }

    #[test]
    fn delete_target_labels() {
        let target = DeleteTarget::Entry("timeout".into());
        assert_eq!(target.kind(), "entry");
        assert_eq!(target.name(), "timeout");
    }
}
