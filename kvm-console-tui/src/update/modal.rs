//! 弹窗输入与确认

use kvm_console_core::Command;

use crate::message::ModalMessage;
use crate::model::App;
use crate::model::state::{DeleteTarget, Modal, PairField};

/// 处理弹窗消息
pub fn update(app: &mut App, msg: ModalMessage) {
    let Some(modal) = app.modal.active.as_mut() else {
        return;
    };

    match msg {
        ModalMessage::Close => app.modal.close(),
        ModalMessage::NextField | ModalMessage::PrevField => switch_field(modal),
        ModalMessage::Input(ch) => {
            if let Some(text) = active_text(modal) {
                text.push(ch);
            }
        }
        ModalMessage::Paste(pasted) => paste(modal, &pasted),
        ModalMessage::Newline => {
            if let Modal::BulkInput { text } = modal {
                text.push('\n');
            }
        }
        ModalMessage::Backspace => {
            if let Some(text) = active_text(modal) {
                text.pop();
            }
        }
        ModalMessage::Confirm => confirm(app),
    }
}

fn switch_field(modal: &mut Modal) {
    match modal {
        Modal::PairInput { field, .. } => *field = field.toggle(),
        Modal::ConfirmDelete {
            confirm_focused, ..
        } => *confirm_focused = !*confirm_focused,
        _ => {}
    }
}

/// 当前正在编辑的文本
fn active_text(modal: &mut Modal) -> Option<&mut String> {
    match modal {
        Modal::CreateKvm { name } => Some(name),
        Modal::PairInput {
            field: PairField::Name,
            name,
            ..
        } => Some(name),
        Modal::PairInput {
            field: PairField::Value,
            value,
            ..
        } => Some(value),
        Modal::BulkInput { text } => Some(text),
        _ => None,
    }
}

/// 批量框原样接收；单行框丢弃换行
fn paste(modal: &mut Modal, pasted: &str) {
    let multiline = matches!(modal, Modal::BulkInput { .. });
    let Some(text) = active_text(modal) else {
        return;
    };
    if multiline {
        text.push_str(&pasted.replace("\r\n", "\n"));
    } else {
        text.extend(pasted.chars().filter(|c| !matches!(c, '\r' | '\n')));
    }
}

/// 关闭弹窗并把输入交给 Controller；校验失败的提示由 Controller 给出
fn confirm(app: &mut App) {
    let Some(modal) = app.modal.take() else {
        return;
    };

    match modal {
        Modal::CreateKvm { name } => app.dispatch(Command::CreateKvm(name)),

        Modal::ConfirmDelete {
            target,
            confirm_focused,
        } => {
            if !confirm_focused {
                return;
            }
            match target {
                DeleteTarget::Kvm(name) => app.dispatch(Command::DeleteKvm(name)),
                DeleteTarget::Entry(name) => app.dispatch(Command::DeleteEntry(name)),
            }
        }

        // 新增行：先写入暂存区，失败时下次打开仍保留输入
        Modal::PairInput {
            line: None,
            name,
            value,
            ..
        } => {
            app.dispatch(Command::SetStagingName(name));
            app.dispatch(Command::SetStagingValue(value));
            app.dispatch(Command::AddPair);
        }

        Modal::PairInput {
            line: Some(index),
            name,
            value,
            ..
        } => app.dispatch(Command::EditLine { index, name, value }),

        Modal::BulkInput { text } => {
            app.dispatch(Command::SetBulkText(text));
            app.dispatch(Command::ImportBulk);
        }

        Modal::EntryDetail { .. } | Modal::Notices { .. } | Modal::Help => {}
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kvm_console_core::{Controller, Effect, NoticeLevel};

    use super::*;

    fn app_with_kvm() -> App {
        let mut app = App::new(Controller::new("acme"), PathBuf::from("."));
        app.dispatch(Command::SelectEnvironment("prod".into()));
        app.dispatch(Command::SelectKvm("settings".into()));
        app.take_effects();
        app
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            update(app, ModalMessage::Input(ch));
        }
    }

    #[test]
    fn pair_input_adds_draft_line() {
        let mut app = app_with_kvm();
        app.modal.show_pair_input(None, "", "");
        type_text(&mut app, "timeout");
        update(&mut app, ModalMessage::NextField);
        type_text(&mut app, "30");
        update(&mut app, ModalMessage::Confirm);

        assert!(!app.modal.is_open());
        let draft = app.view.draft.as_ref().unwrap();
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].name, "timeout");
        assert_eq!(draft.lines()[0].value, "30");
        assert!(draft.staging().name.is_empty());
    }

    #[test]
    fn rejected_pair_keeps_staging() {
        let mut app = app_with_kvm();
        app.modal.show_pair_input(None, "", "");
        type_text(&mut app, "timeout");
        update(&mut app, ModalMessage::Confirm);

        assert_eq!(app.status.as_ref().unwrap().level, NoticeLevel::Warning);
        let draft = app.view.draft.as_ref().unwrap();
        assert!(draft.is_empty());
        assert_eq!(draft.staging().name, "timeout");
    }

    #[test]
    fn pasted_bulk_json_is_imported() {
        let mut app = app_with_kvm();
        app.modal.show_bulk_input("");
        update(
            &mut app,
            ModalMessage::Paste("[{\"name\":\"a\",\"value\":\"1\"},\r\n{\"name\":\"b\",\"value\":\"2\"}]".into()),
        );
        update(&mut app, ModalMessage::Confirm);

        let draft = app.view.draft.as_ref().unwrap();
        assert_eq!(draft.len(), 2);
        assert!(draft.bulk_text().is_empty());
    }

    #[test]
    fn single_line_paste_drops_newlines() {
        let mut app = app_with_kvm();
        app.modal.show_create_kvm();
        update(&mut app, ModalMessage::Paste("new\nmap".into()));

        assert_eq!(
            app.modal.active,
            Some(Modal::CreateKvm {
                name: "newmap".into()
            })
        );
    }

    #[test]
    fn delete_needs_confirm_button() {
        let mut app = app_with_kvm();
        app.modal
            .show_confirm_delete(DeleteTarget::Entry("timeout".into()));
        update(&mut app, ModalMessage::Confirm);
        assert!(app.take_effects().is_empty());

        app.modal
            .show_confirm_delete(DeleteTarget::Entry("timeout".into()));
        update(&mut app, ModalMessage::NextField);
        update(&mut app, ModalMessage::Confirm);
        assert!(matches!(
            app.take_effects().as_slice(),
            [Effect::DeleteEntry { name, .. }] if name == "timeout"
        ));
    }
}
