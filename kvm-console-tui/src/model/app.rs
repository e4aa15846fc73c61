//! 应用主状态

use std::path::PathBuf;

use kvm_console_core::{Command, ConsoleView, Controller, Effect, Notice, NoticeLevel, Outcome};

use super::focus::FocusPanel;
use super::state::ModalState;

/// 应用主状态
///
/// 业务状态全部在 `controller` 里；`view` 是它的快照，每次变更后重建，
/// 渲染层只读 `view`。
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 当前焦点面板
    pub focus: FocusPanel,
    pub controller: Controller,
    pub view: ConsoleView,
    /// 各面板当前页内的高亮行，按 `FocusPanel` 顺序
    highlights: [usize; 4],
    /// 状态栏消息
    pub status: Option<Notice>,
    pub modal: ModalState,
    /// 导出文件目录
    pub export_dir: PathBuf,
    /// 等待 TaskRunner 取走的远程调用
    pending: Vec<Effect>,
}

impl App {
    pub fn new(controller: Controller, export_dir: PathBuf) -> Self {
        let view = controller.view();
        Self {
            should_quit: false,
            focus: FocusPanel::default(),
            controller,
            view,
            highlights: [0; 4],
            status: None,
            modal: ModalState::new(),
            export_dir,
            pending: Vec::new(),
        }
    }

    /// 首次加载环境列表
    pub fn start(&mut self) {
        let effects = self.controller.start();
        self.after_change(effects);
    }

    pub fn dispatch(&mut self, command: Command) {
        let effects = self.controller.dispatch(command);
        self.after_change(effects);
    }

    pub fn apply(&mut self, outcome: Outcome) {
        let effects = self.controller.apply(outcome);
        self.after_change(effects);
    }

    /// 取走待执行的远程调用
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    fn after_change(&mut self, effects: Vec<Effect>) {
        self.pending.extend(effects);
        self.refresh_view();
        self.collect_notices();
    }

    /// 重建视图快照；隐藏的面板交出焦点，越界的高亮收回
    pub fn refresh_view(&mut self) {
        self.view = self.controller.view();
        self.focus = self.focus.settle(&self.view);
        for panel in [
            FocusPanel::Environments,
            FocusPanel::Kvms,
            FocusPanel::Entries,
            FocusPanel::Draft,
        ] {
            let len = self.item_count(panel);
            let slot = &mut self.highlights[panel_slot(panel)];
            *slot = (*slot).min(len.saturating_sub(1));
        }
    }

    /// 凭证问题或多条错误需要弹窗确认，其余只在状态栏显示最后一条；
    /// 输入弹窗打开时弹窗提示排队，状态栏先给出提醒
    fn collect_notices(&mut self) {
        let notices = self.controller.take_notices();
        if notices.is_empty() {
            return;
        }
        for notice in &notices {
            match notice.level {
                NoticeLevel::Info => tracing::info!("{}", notice.message),
                NoticeLevel::Warning => tracing::warn!("{}", notice.message),
                NoticeLevel::Error | NoticeLevel::Blocking => {
                    tracing::error!("{}", notice.message);
                }
            }
        }

        let blocking = notices.iter().any(|n| n.level == NoticeLevel::Blocking);
        let errors = notices
            .iter()
            .filter(|n| n.level >= NoticeLevel::Error)
            .count();
        if blocking || errors > 1 {
            if !self.modal.show_notices(notices) {
                let waiting = self.modal.pending_notice_count();
                self.status = Some(Notice::warning(format!(
                    "{waiting} notice(s) waiting, shown when this dialog closes"
                )));
            }
        } else {
            self.status = notices.into_iter().last();
        }
    }

    // ===== 高亮 =====

    pub fn highlight(&self, panel: FocusPanel) -> usize {
        self.highlights[panel_slot(panel)]
    }

    /// 面板当前可见的行数（列表为当前页，草稿为全部行）
    pub fn item_count(&self, panel: FocusPanel) -> usize {
        match panel {
            FocusPanel::Environments => self.view.environments.items.len(),
            FocusPanel::Kvms => self.view.kvms.items.len(),
            FocusPanel::Entries => self.view.entries.items.len(),
            FocusPanel::Draft => self.view.draft.as_ref().map_or(0, |d| d.len()),
        }
    }

    pub fn select_previous(&mut self) {
        let slot = &mut self.highlights[panel_slot(self.focus)];
        *slot = slot.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        let len = self.item_count(self.focus);
        let slot = &mut self.highlights[panel_slot(self.focus)];
        if *slot + 1 < len {
            *slot += 1;
        }
    }

    /// 翻页后高亮回到第一行
    pub fn reset_highlight(&mut self, panel: FocusPanel) {
        self.highlights[panel_slot(panel)] = 0;
    }

    /// 焦点面板高亮行的名称
    pub fn highlighted_name(&self) -> Option<String> {
        let index = self.highlight(self.focus);
        match self.focus {
            FocusPanel::Environments => self
                .view
                .environments
                .items
                .get(index)
                .map(|e| e.name.clone()),
            FocusPanel::Kvms => self.view.kvms.items.get(index).map(|k| k.name.clone()),
            FocusPanel::Entries => self.view.entries.items.get(index).map(|e| e.name.clone()),
            FocusPanel::Draft => self
                .view
                .draft
                .as_ref()
                .and_then(|d| d.lines().get(index))
                .map(|l| l.name.clone()),
        }
    }

    // ===== 状态栏 =====

    pub fn set_status(&mut self, notice: Notice) {
        self.status = Some(notice);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }
}

fn panel_slot(panel: FocusPanel) -> usize {
    match panel {
        FocusPanel::Environments => 0,
        FocusPanel::Kvms => 1,
        FocusPanel::Entries => 2,
        FocusPanel::Draft => 3,
    }
}
