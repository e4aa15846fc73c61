//! 层级选择状态
//!
//! 环境 → KVM 单选，重复点击即取消选择；上层变化时下层级联清空。

use serde::Serialize;

use crate::error::{CoreResult, ValidationError};
use crate::pagination::{ENTRY_PAGE_SIZE, ENVIRONMENT_PAGE_SIZE, KVM_PAGE_SIZE, PageCursor};

/// 三级列表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ListLevel {
    Environment,
    Kvm,
    Entry,
}

impl ListLevel {
    pub const ALL: [Self; 3] = [Self::Environment, Self::Kvm, Self::Entry];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Environment => 0,
            Self::Kvm => 1,
            Self::Entry => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Environment => "environments",
            Self::Kvm => "key-value maps",
            Self::Entry => "entries",
        }
    }
}

/// 选择操作的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected,
    Deselected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionState {
    environment: Option<String>,
    kvm: Option<String>,
    cursors: [PageCursor; 3],
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            environment: None,
            kvm: None,
            cursors: [
                PageCursor::new(ENVIRONMENT_PAGE_SIZE),
                PageCursor::new(KVM_PAGE_SIZE),
                PageCursor::new(ENTRY_PAGE_SIZE),
            ],
        }
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// 仅在已选环境时有意义
    pub fn kvm(&self) -> Option<&str> {
        self.environment.as_ref().and(self.kvm.as_deref())
    }

    pub fn cursor(&self, level: ListLevel) -> &PageCursor {
        &self.cursors[level.index()]
    }

    pub fn cursor_mut(&mut self, level: ListLevel) -> &mut PageCursor {
        &mut self.cursors[level.index()]
    }

    /// 选择环境；重复选择同一环境则取消
    ///
    /// 两种情况都会清空 KVM 选择并重置 KVM、条目游标。
    pub fn select_environment(&mut self, name: &str) -> SelectionChange {
        let change = if self.environment.as_deref() == Some(name) {
            self.environment = None;
            SelectionChange::Deselected
        } else {
            self.environment = Some(name.to_string());
            SelectionChange::Selected
        };
        self.kvm = None;
        self.cursor_mut(ListLevel::Kvm).reset();
        self.cursor_mut(ListLevel::Entry).reset();
        change
    }

    /// 选择 KVM；重复选择同一 KVM 则取消
    pub fn select_kvm(&mut self, name: &str) -> CoreResult<SelectionChange> {
        if self.environment.is_none() {
            return Err(ValidationError::NoEnvironment.into());
        }
        let change = if self.kvm.as_deref() == Some(name) {
            self.kvm = None;
            SelectionChange::Deselected
        } else {
            self.kvm = Some(name.to_string());
            SelectionChange::Selected
        };
        self.cursor_mut(ListLevel::Entry).reset();
        Ok(change)
    }

    /// 清除 KVM 选择（删除当前 KVM 后）
    pub fn clear_kvm(&mut self) {
        self.kvm = None;
        self.cursor_mut(ListLevel::Entry).reset();
    }

    /// `organizations/{org}[/environments/{env}[/keyvaluemaps/{kvm}]]`
    pub fn breadcrumb(&self, organization: &str) -> String {
        let mut crumb = format!("organizations/{organization}");
        if let Some(env) = self.environment() {
            crumb.push_str("/environments/");
            crumb.push_str(env);
            if let Some(kvm) = self.kvm() {
                crumb.push_str("/keyvaluemaps/");
                crumb.push_str(kvm);
            }
        }
        crumb
    }
}
