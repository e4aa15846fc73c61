//! 焦点状态定义

use kvm_console_core::{ConsoleView, ListLevel};

/// 焦点面板枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusPanel {
    /// 环境列表
    #[default]
    Environments,
    /// KVM 列表
    Kvms,
    /// 条目列表
    Entries,
    /// 条目草稿
    Draft,
}

impl FocusPanel {
    const ORDER: [Self; 4] = [Self::Environments, Self::Kvms, Self::Entries, Self::Draft];

    /// 对应的列表级别；草稿面板没有
    pub fn level(self) -> Option<ListLevel> {
        match self {
            Self::Environments => Some(ListLevel::Environment),
            Self::Kvms => Some(ListLevel::Kvm),
            Self::Entries => Some(ListLevel::Entry),
            Self::Draft => None,
        }
    }

    fn is_visible(self, view: &ConsoleView) -> bool {
        match self {
            Self::Environments => true,
            Self::Kvms => view.kvms.visible,
            Self::Entries => view.entries.visible,
            Self::Draft => view.draft.is_some(),
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|p| *p == self).unwrap_or(0)
    }

    /// 切换到下一个可见面板
    pub fn next(self, view: &ConsoleView) -> Self {
        let start = self.position();
        (1..=Self::ORDER.len())
            .map(|step| Self::ORDER[(start + step) % Self::ORDER.len()])
            .find(|p| p.is_visible(view))
            .unwrap_or(Self::Environments)
    }

    /// 切换到上一个可见面板
    pub fn prev(self, view: &ConsoleView) -> Self {
        let start = self.position();
        let len = Self::ORDER.len();
        (1..=len)
            .map(|step| Self::ORDER[(start + len - step) % len])
            .find(|p| p.is_visible(view))
            .unwrap_or(Self::Environments)
    }

    /// 当前面板被隐藏时退回到最近的可见上级
    pub fn settle(self, view: &ConsoleView) -> Self {
        let mut panel = self;
        while !panel.is_visible(view) {
            panel = match panel {
                Self::Draft => Self::Entries,
                Self::Entries => Self::Kvms,
                Self::Kvms | Self::Environments => return Self::Environments,
            };
        }
        panel
    }
}
