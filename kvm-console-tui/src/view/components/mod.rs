//! 可复用的界面组件

pub mod draft_panel;
pub mod list_panel;
pub mod modal;
pub mod statusbar;
