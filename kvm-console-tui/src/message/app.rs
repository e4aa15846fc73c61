//! 应用主消息枚举

use super::{ContentMessage, ModalMessage};

/// 应用主消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    /// 退出应用
    Quit,

    /// 焦点移到下一个可见面板
    NextFocus,

    /// 焦点移到上一个可见面板
    PrevFocus,

    /// 内容面板相关消息
    Content(ContentMessage),

    /// 弹窗相关消息
    Modal(ModalMessage),

    /// 重新拉取最深一级可见列表
    Refresh,

    /// 导出当前 KVM 的条目
    Export,

    /// 显示帮助
    ShowHelp,

    /// 清除状态消息
    ClearStatus,

    /// 无操作（用于忽略未处理的事件）
    Noop,
}
