//! 内容面板消息
//!
//! 作用于当前焦点面板的高亮行

/// 内容面板消息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentMessage {
    // ========== 列表导航 ==========
    SelectPrevious,
    SelectNext,
    /// 环境/KVM：选中；条目：查看详情；草稿行：编辑
    Confirm,
    PrevPage,
    NextPage,

    // ========== 增删改 ==========
    /// KVM 面板：新建 KVM；草稿面板：按当前模式新增
    Add,
    /// 编辑草稿行
    Edit,
    /// KVM / 条目：确认后远程删除；草稿行：直接移除
    Delete,

    // ========== 草稿 ==========
    /// 逐对输入 / 批量 JSON 模式切换
    ToggleMode,
    /// 提交草稿
    Commit,
}
