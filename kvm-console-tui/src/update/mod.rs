//!
//! src/update/mod.rs
//! Update 层：消费 Message，修改 Model
//!
//! 有模块结构：
//!     src/update/mod.rs
//!         mod content;    // 焦点面板的操作
//!         mod modal;      // 弹窗输入与确认
//!
//! 业务变更一律转成 kvm_console_core::Command 交给 App::dispatch，
//! 这里只处理焦点、高亮、弹窗这类纯 UI 状态。
//! dispatch 产生的 Effect 留在 App 里，由主循环交给 TaskRunner。
//!

mod content;
mod modal;

use kvm_console_core::{Command, CoreError, ListLevel, Notice, ValidationError};

use crate::backend::write_export;
use crate::message::AppMessage;
use crate::model::App;

/// 处理应用消息，更新状态
pub fn update(app: &mut App, msg: AppMessage) {
    match msg {
        AppMessage::Quit => {
            app.should_quit = true;
        }

        AppMessage::NextFocus => {
            app.focus = app.focus.next(&app.view);
        }

        AppMessage::PrevFocus => {
            app.focus = app.focus.prev(&app.view);
        }

        AppMessage::Content(content_msg) => {
            content::update(app, content_msg);
        }

        AppMessage::Modal(modal_msg) => {
            modal::update(app, modal_msg);
        }

        AppMessage::Refresh => {
            app.clear_status();
            app.dispatch(Command::Refresh);
        }

        AppMessage::Export => export(app),

        AppMessage::ShowHelp => {
            app.modal.show_help();
        }

        AppMessage::ClearStatus => {
            app.clear_status();
        }

        AppMessage::Noop => {}
    }
}

/// 导出当前 KVM 已加载的全部条目
fn export(app: &mut App) {
    let Some(kvm) = app.controller.selection().kvm() else {
        app.set_status(Notice::from(&CoreError::from(ValidationError::NoKvm)));
        return;
    };
    // 加载中导出会用空列表覆盖之前的文件
    if app.controller.is_loading(ListLevel::Entry) {
        let notice = Notice::warning(format!(
            "Entries of '{kvm}' are still loading, try exporting again shortly"
        ));
        app.set_status(notice);
        return;
    }

    let exported = match app.controller.export_entries() {
        Ok(exported) => exported,
        Err(err) => {
            app.set_status(Notice::from(&err));
            return;
        }
    };

    match write_export(&app.export_dir, &exported) {
        Ok(path) => app.set_status(Notice::info(format!(
            "Exported {} entries to {}",
            exported.count,
            path.display()
        ))),
        Err(err) => {
            tracing::error!("Export failed: {err:#}");
            app.set_status(Notice::error(format!("Export failed: {err:#}")));
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kvm_console_core::{Controller, Effect, NoticeLevel, Outcome};
    use kvm_console_provider::Entry;

    use super::*;
    use crate::model::FocusPanel;

    /// 选中 prod/settings，条目仍在加载
    fn app_loading_entries(export_dir: PathBuf) -> (App, Effect) {
        let mut app = App::new(Controller::new("acme"), export_dir);
        app.dispatch(Command::SelectEnvironment("prod".into()));
        app.dispatch(Command::SelectKvm("settings".into()));
        let fetch = app
            .take_effects()
            .into_iter()
            .find(|e| matches!(e, Effect::ListEntries { .. }))
            .unwrap();
        (app, fetch)
    }

    #[test]
    fn export_requires_selected_kvm() {
        let mut app = App::new(Controller::new("acme"), PathBuf::from("."));
        update(&mut app, AppMessage::Export);

        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, NoticeLevel::Warning);
    }

    #[test]
    fn export_writes_file_and_reports_path() {
        let dir = std::env::temp_dir().join(format!("kvm-console-update-{}", std::process::id()));
        let (mut app, fetch) = app_loading_entries(dir.clone());
        let Effect::ListEntries { token, .. } = fetch else {
            unreachable!()
        };
        app.apply(Outcome::EntriesListed {
            token,
            result: Ok(vec![Entry::new("timeout", "30")]),
        });

        update(&mut app, AppMessage::Export);

        let status = app.status.clone().unwrap();
        assert_eq!(status.level, NoticeLevel::Info);
        let written = std::fs::read_to_string(dir.join("prod-settings-entries.json")).unwrap();
        assert!(written.contains("timeout"));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn export_refused_while_entries_load() {
        let dir = std::env::temp_dir().join(format!("kvm-console-loading-{}", std::process::id()));
        let (mut app, _fetch) = app_loading_entries(dir.clone());

        update(&mut app, AppMessage::Export);

        let status = app.status.as_ref().unwrap();
        assert_eq!(status.level, NoticeLevel::Warning);
        assert!(status.message.contains("still loading"));
        assert!(!dir.join("prod-settings-entries.json").exists());
    }

    #[test]
    fn focus_moves_only_between_visible_panels() {
        let mut app = App::new(Controller::new("acme"), PathBuf::from("."));
        update(&mut app, AppMessage::NextFocus);
        assert_eq!(app.focus, FocusPanel::Environments);

        app.dispatch(Command::SelectEnvironment("prod".into()));
        update(&mut app, AppMessage::NextFocus);
        assert_eq!(app.focus, FocusPanel::Kvms);
        update(&mut app, AppMessage::PrevFocus);
        assert_eq!(app.focus, FocusPanel::Environments);
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = App::new(Controller::new("acme"), PathBuf::from("."));
        update(&mut app, AppMessage::Quit);
        assert!(app.should_quit);
    }
}
