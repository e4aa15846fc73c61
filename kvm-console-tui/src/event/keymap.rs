//! 快捷键配置

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// 一个按键组合：修饰键 + 键码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding(KeyModifiers, KeyCode);

impl KeyBinding {
    const fn plain(code: KeyCode) -> Self {
        Self(KeyModifiers::NONE, code)
    }

    const fn alt(ch: char) -> Self {
        Self(KeyModifiers::ALT, KeyCode::Char(ch))
    }

    const fn ctrl(ch: char) -> Self {
        Self(KeyModifiers::CONTROL, KeyCode::Char(ch))
    }

    /// 修饰键必须完全一致，Alt+a 不匹配 Alt+Shift+a
    pub fn matches(self, key: &KeyEvent) -> bool {
        let Self(modifiers, code) = self;
        key.modifiers == modifiers && key.code == code
    }
}

/// 默认快捷键
///
/// 动作键都带 Alt，弹窗打开时普通字符全部进入输入框。
pub struct DefaultKeymap;

impl DefaultKeymap {
    pub const QUIT: KeyBinding = KeyBinding::alt('q');
    pub const FORCE_QUIT: KeyBinding = KeyBinding::ctrl('c');
    pub const HELP: KeyBinding = KeyBinding::alt('h');
    pub const REFRESH: KeyBinding = KeyBinding::alt('r');
    pub const EXPORT: KeyBinding = KeyBinding::alt('x');
    pub const CLEAR_STATUS: KeyBinding = KeyBinding::plain(KeyCode::Esc);

    pub const FOCUS_NEXT: KeyBinding = KeyBinding::plain(KeyCode::Tab);
    pub const FOCUS_LEFT: KeyBinding = KeyBinding::plain(KeyCode::Left);
    pub const FOCUS_RIGHT: KeyBinding = KeyBinding::plain(KeyCode::Right);

    pub const PAGE_PREV: KeyBinding = KeyBinding::plain(KeyCode::PageUp);
    pub const PAGE_NEXT: KeyBinding = KeyBinding::plain(KeyCode::PageDown);

    pub const ACTION_ADD: KeyBinding = KeyBinding::alt('a');
    pub const ACTION_EDIT: KeyBinding = KeyBinding::alt('e');
    pub const ACTION_DELETE: KeyBinding = KeyBinding::alt('d');
    pub const ACTION_MODE: KeyBinding = KeyBinding::alt('m');
    pub const ACTION_COMMIT: KeyBinding = KeyBinding::alt('c');

    // 批量输入框内 Enter 是换行
    pub const SUBMIT_BULK: KeyBinding = KeyBinding::ctrl('s');
}
