//! 焦点面板操作

use kvm_console_core::{Command, CoreError, InputMode, Notice, ValidationError};

use crate::message::ContentMessage;
use crate::model::state::DeleteTarget;
use crate::model::{App, FocusPanel};

/// 处理内容面板消息
pub fn update(app: &mut App, msg: ContentMessage) {
    match msg {
        ContentMessage::SelectPrevious => app.select_previous(),
        ContentMessage::SelectNext => app.select_next(),
        ContentMessage::Confirm => confirm(app),
        ContentMessage::PrevPage => turn_page(app, false),
        ContentMessage::NextPage => turn_page(app, true),
        ContentMessage::Add => add(app),
        ContentMessage::Edit => edit_line(app),
        ContentMessage::Delete => delete(app),
        ContentMessage::ToggleMode => app.dispatch(Command::ToggleMode),
        ContentMessage::Commit => app.dispatch(Command::Commit),
    }
}

/// Enter：选中环境/KVM 并把焦点推到下一级
fn confirm(app: &mut App) {
    let Some(name) = app.highlighted_name() else {
        return;
    };

    match app.focus {
        FocusPanel::Environments => {
            app.dispatch(Command::SelectEnvironment(name));
            if app.view.kvms.visible {
                app.focus = FocusPanel::Kvms;
            }
        }
        FocusPanel::Kvms => {
            app.dispatch(Command::SelectKvm(name));
            if app.view.entries.visible {
                app.focus = FocusPanel::Entries;
            }
        }
        FocusPanel::Entries => {
            if let Some(entry) = app.view.entries.items.iter().find(|e| e.name == name) {
                let (name, value) = (entry.name.clone(), entry.value.clone());
                app.modal.show_entry_detail(&name, &value);
            }
        }
        FocusPanel::Draft => edit_line(app),
    }
}

fn turn_page(app: &mut App, forward: bool) {
    let Some(level) = app.focus.level() else {
        return;
    };
    let command = if forward {
        Command::NextPage(level)
    } else {
        Command::PrevPage(level)
    };
    app.dispatch(command);
    app.reset_highlight(app.focus);
}

/// Alt+a：KVM 面板新建 KVM，条目/草稿面板按当前输入模式打开草稿输入
fn add(app: &mut App) {
    match app.focus {
        FocusPanel::Environments => {}
        FocusPanel::Kvms => app.modal.show_create_kvm(),
        FocusPanel::Entries | FocusPanel::Draft => {
            let Some(draft) = app.view.draft.as_ref() else {
                app.set_status(Notice::from(&CoreError::from(ValidationError::NoKvm)));
                return;
            };
            match draft.mode() {
                InputMode::Pair => {
                    let staging = draft.staging().clone();
                    app.modal
                        .show_pair_input(None, &staging.name, &staging.value);
                }
                InputMode::BulkJson => {
                    let text = draft.bulk_text().to_string();
                    app.modal.show_bulk_input(&text);
                }
            }
        }
    }
}

/// 编辑高亮的草稿行
fn edit_line(app: &mut App) {
    if app.focus != FocusPanel::Draft {
        return;
    }
    let index = app.highlight(FocusPanel::Draft);
    let line = app
        .view
        .draft
        .as_ref()
        .and_then(|d| d.lines().get(index))
        .cloned();
    if let Some(line) = line {
        app.modal
            .show_pair_input(Some(index), &line.name, &line.value);
    }
}

/// 远程对象先确认，草稿行直接移除
fn delete(app: &mut App) {
    match app.focus {
        FocusPanel::Environments => {}
        FocusPanel::Kvms => {
            if let Some(name) = app.highlighted_name() {
                app.modal.show_confirm_delete(DeleteTarget::Kvm(name));
            }
        }
        FocusPanel::Entries => {
            if let Some(name) = app.highlighted_name() {
                app.modal.show_confirm_delete(DeleteTarget::Entry(name));
            }
        }
        FocusPanel::Draft => {
            if app.item_count(FocusPanel::Draft) > 0 {
                let index = app.highlight(FocusPanel::Draft);
                app.dispatch(Command::RemoveLine(index));
            }
        }
    }
}
