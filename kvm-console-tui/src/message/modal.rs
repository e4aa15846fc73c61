//! 弹窗消息类型

/// 弹窗相关消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMessage {
    /// 关闭弹窗
    Close,

    /// 下一个输入字段（也用于删除确认中切换按钮）
    NextField,

    /// 上一个输入字段
    PrevField,

    /// 确认/提交
    Confirm,

    /// 输入字符
    Input(char),

    /// 粘贴一段文本（bracketed paste）
    Paste(String),

    /// 批量输入框中换行
    Newline,

    /// 删除字符（Backspace）
    Backspace,
}
