//! 视图快照
//!
//! 每次渲染前从 Controller 重新派生，渲染层只读。

use serde::Serialize;

use kvm_console_provider::{Entry, Environment, KeyValueMap};

use crate::draft::EntryDraftBuffer;
use crate::pagination::PageCursor;

/// 单级列表的当前页
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView<T> {
    /// 当前页的条目
    pub items: Vec<T>,
    pub total: usize,
    /// 从 0 开始
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// 该级已选中的名称
    pub selected: Option<String>,
    pub loading: bool,
    /// 上级未选择时该级不显示
    pub visible: bool,
}

impl<T: Clone> ListView<T> {
    pub(crate) fn build(
        items: &[T],
        cursor: &PageCursor,
        selected: Option<&str>,
        loading: bool,
        visible: bool,
    ) -> Self {
        let page = cursor.slice(items);
        Self {
            items: page.subset.to_vec(),
            total: page.total,
            page: cursor.page(),
            page_count: cursor.page_count(page.total),
            has_prev: page.has_prev,
            has_next: page.has_next,
            selected: selected.map(str::to_string),
            loading,
            visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsoleView {
    pub organization: String,
    pub breadcrumb: String,
    pub environments: ListView<Environment>,
    pub kvms: ListView<KeyValueMap>,
    pub entries: ListView<Entry>,
    /// 仅在选中 KVM 时存在
    pub draft: Option<EntryDraftBuffer>,
}
