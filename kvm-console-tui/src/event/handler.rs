//! 事件处理器

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::event::keymap::DefaultKeymap;
use crate::message::{AppMessage, ContentMessage, ModalMessage};
use crate::model::App;
use crate::model::state::Modal;

/// 轮询事件
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// 处理事件，返回对应的消息
pub fn handle_event(event: Event, app: &App) -> AppMessage {
    match event {
        Event::Key(key_event) => handle_key_event(key_event, app),
        // 粘贴只对输入弹窗有意义
        Event::Paste(text) if app.modal.is_open() => AppMessage::Modal(ModalMessage::Paste(text)),
        _ => AppMessage::Noop,
    }
}

/// 处理键盘事件
fn handle_key_event(key: KeyEvent, app: &App) -> AppMessage {
    // 只处理 Press 事件，Windows 终端会额外发送 Release
    if key.kind != KeyEventKind::Press {
        return AppMessage::Noop;
    }

    if let Some(modal) = &app.modal.active {
        return handle_modal_keys(key, modal);
    }

    if DefaultKeymap::FORCE_QUIT.matches(&key) || DefaultKeymap::QUIT.matches(&key) {
        return AppMessage::Quit;
    }
    if DefaultKeymap::HELP.matches(&key)
        || (key.modifiers.is_empty() && key.code == KeyCode::Char('?'))
    {
        return AppMessage::ShowHelp;
    }
    if DefaultKeymap::REFRESH.matches(&key) {
        return AppMessage::Refresh;
    }
    if DefaultKeymap::EXPORT.matches(&key) {
        return AppMessage::Export;
    }
    if DefaultKeymap::CLEAR_STATUS.matches(&key) {
        return AppMessage::ClearStatus;
    }

    if DefaultKeymap::FOCUS_NEXT.matches(&key) || DefaultKeymap::FOCUS_RIGHT.matches(&key) {
        return AppMessage::NextFocus;
    }
    if key.code == KeyCode::BackTab || DefaultKeymap::FOCUS_LEFT.matches(&key) {
        return AppMessage::PrevFocus;
    }

    handle_content_keys(key)
}

/// 处理焦点面板的按键
fn handle_content_keys(key: KeyEvent) -> AppMessage {
    let action = if DefaultKeymap::ACTION_ADD.matches(&key) {
        Some(ContentMessage::Add)
    } else if DefaultKeymap::ACTION_EDIT.matches(&key) {
        Some(ContentMessage::Edit)
    } else if DefaultKeymap::ACTION_DELETE.matches(&key) {
        Some(ContentMessage::Delete)
    } else if DefaultKeymap::ACTION_MODE.matches(&key) {
        Some(ContentMessage::ToggleMode)
    } else if DefaultKeymap::ACTION_COMMIT.matches(&key) {
        Some(ContentMessage::Commit)
    } else if DefaultKeymap::PAGE_PREV.matches(&key) {
        Some(ContentMessage::PrevPage)
    } else if DefaultKeymap::PAGE_NEXT.matches(&key) {
        Some(ContentMessage::NextPage)
    } else {
        None
    };
    if let Some(action) = action {
        return AppMessage::Content(action);
    }

    if !key.modifiers.is_empty() {
        return AppMessage::Noop;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => AppMessage::Content(ContentMessage::SelectPrevious),
        KeyCode::Down | KeyCode::Char('j') => AppMessage::Content(ContentMessage::SelectNext),
        KeyCode::Enter => AppMessage::Content(ContentMessage::Confirm),
        KeyCode::Char('[') => AppMessage::Content(ContentMessage::PrevPage),
        KeyCode::Char(']') => AppMessage::Content(ContentMessage::NextPage),
        _ => AppMessage::Noop,
    }
}

/// 处理弹窗中的按键
fn handle_modal_keys(key: KeyEvent, modal: &Modal) -> AppMessage {
    // Esc 和 Ctrl+C 始终可以关闭弹窗
    if key.code == KeyCode::Esc || DefaultKeymap::FORCE_QUIT.matches(&key) {
        return AppMessage::Modal(ModalMessage::Close);
    }

    match modal {
        Modal::CreateKvm { .. } => handle_text_keys(key),
        Modal::PairInput { .. } => match key.code {
            KeyCode::Tab | KeyCode::Down => AppMessage::Modal(ModalMessage::NextField),
            KeyCode::BackTab | KeyCode::Up => AppMessage::Modal(ModalMessage::PrevField),
            _ => handle_text_keys(key),
        },
        Modal::BulkInput { .. } => handle_bulk_keys(key),
        Modal::ConfirmDelete { .. } => match key.code {
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => {
                AppMessage::Modal(ModalMessage::NextField)
            }
            KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
            _ => AppMessage::Noop,
        },
        // 只读弹窗只响应关闭
        Modal::EntryDetail { .. } | Modal::Notices { .. } | Modal::Help => match key.code {
            KeyCode::Enter => AppMessage::Modal(ModalMessage::Close),
            _ => AppMessage::Noop,
        },
    }
}

/// 单行文本输入
fn handle_text_keys(key: KeyEvent) -> AppMessage {
    match key.code {
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Confirm),
        KeyCode::Backspace => AppMessage::Modal(ModalMessage::Backspace),
        KeyCode::Char(ch) if is_plain(key.modifiers) => AppMessage::Modal(ModalMessage::Input(ch)),
        _ => AppMessage::Noop,
    }
}

/// 多行 JSON 输入：Enter 换行，Ctrl+S 或 Alt+Enter 提交
fn handle_bulk_keys(key: KeyEvent) -> AppMessage {
    if DefaultKeymap::SUBMIT_BULK.matches(&key)
        || (key.modifiers == KeyModifiers::ALT && key.code == KeyCode::Enter)
    {
        return AppMessage::Modal(ModalMessage::Confirm);
    }
    match key.code {
        KeyCode::Enter => AppMessage::Modal(ModalMessage::Newline),
        KeyCode::Backspace => AppMessage::Modal(ModalMessage::Backspace),
        KeyCode::Tab => AppMessage::Modal(ModalMessage::Input(' ')),
        KeyCode::Char(ch) if is_plain(key.modifiers) => AppMessage::Modal(ModalMessage::Input(ch)),
        _ => AppMessage::Noop,
    }
}

/// 无修饰或仅 Shift 的字符视为文字输入
fn is_plain(modifiers: KeyModifiers) -> bool {
    modifiers.is_empty() || modifiers == KeyModifiers::SHIFT
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use kvm_console_core::Controller;

    use super::*;

    fn app() -> App {
        App::new(Controller::new("acme"), PathBuf::from("."))
    }

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn alt_actions_map_to_content_messages() {
        let app = app();
        assert_eq!(
            handle_event(press(KeyCode::Char('c'), KeyModifiers::ALT), &app),
            AppMessage::Content(ContentMessage::Commit)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('x'), KeyModifiers::ALT), &app),
            AppMessage::Export
        );
        assert_eq!(
            handle_event(press(KeyCode::PageDown, KeyModifiers::NONE), &app),
            AppMessage::Content(ContentMessage::NextPage)
        );
    }

    #[test]
    fn modal_captures_plain_characters() {
        let mut app = app();
        app.modal.show_create_kvm();
        assert_eq!(
            handle_event(press(KeyCode::Char('q'), KeyModifiers::NONE), &app),
            AppMessage::Modal(ModalMessage::Input('q'))
        );
        assert_eq!(
            handle_event(press(KeyCode::Esc, KeyModifiers::NONE), &app),
            AppMessage::Modal(ModalMessage::Close)
        );
    }

    #[test]
    fn bulk_input_uses_enter_for_newline() {
        let mut app = app();
        app.modal.show_bulk_input("");
        assert_eq!(
            handle_event(press(KeyCode::Enter, KeyModifiers::NONE), &app),
            AppMessage::Modal(ModalMessage::Newline)
        );
        assert_eq!(
            handle_event(press(KeyCode::Char('s'), KeyModifiers::CONTROL), &app),
            AppMessage::Modal(ModalMessage::Confirm)
        );
    }

    #[test]
    fn paste_ignored_without_modal() {
        let mut app = app();
        assert_eq!(handle_event(Event::Paste("[]".into()), &app), AppMessage::Noop);

        app.modal.show_bulk_input("");
        assert_eq!(
            handle_event(Event::Paste("[]".into()), &app),
            AppMessage::Modal(ModalMessage::Paste("[]".into()))
        );
    }
}
