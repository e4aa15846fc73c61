//! 用户命令

use serde::Serialize;

use crate::selection::ListLevel;

/// UI 绑定到 [`Controller::dispatch`](super::Controller::dispatch) 的命令
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "args")]
pub enum Command {
    /// 选择环境，再次选择同一环境则取消
    SelectEnvironment(String),
    /// 选择 KVM，再次选择同一 KVM 则取消
    SelectKvm(String),
    NextPage(ListLevel),
    PrevPage(ListLevel),
    /// 在当前环境下创建加密 KVM
    CreateKvm(String),
    DeleteKvm(String),
    DeleteEntry(String),
    /// 重新拉取最深一级可见列表
    Refresh,

    // ===== 草稿编辑 =====
    SetStagingName(String),
    SetStagingValue(String),
    SetBulkText(String),
    AddPair,
    ImportBulk,
    EditLine {
        index: usize,
        name: String,
        value: String,
    },
    RemoveLine(usize),
    ToggleMode,
    /// 提交草稿（批量创建条目）
    Commit,
}
