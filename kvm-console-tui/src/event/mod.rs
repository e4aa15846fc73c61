//!
//! src/event/mod.rs
//! Event 层：把 crossterm 事件翻译为 Message
//!
//! 有模块结构：
//!     src/event/mod.rs
//!         mod handler;    // poll_event / handle_event
//!         mod keymap;     // 快捷键常量
//!
//! 翻译顺序：
//!     1. 只处理 Press，忽略 Release / Repeat
//!     2. 有弹窗时，所有按键和粘贴都交给弹窗
//!     3. 全局快捷键（退出、帮助、刷新、导出、焦点切换）
//!     4. 焦点面板的动作键和列表导航
//!

mod handler;
mod keymap;

pub use handler::{handle_event, poll_event};
