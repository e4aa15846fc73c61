//!
//! src/view/mod.rs
//! View 层：只读 App，把状态画到终端上
//!
//! 有模块结构：
//!     src/view/mod.rs
//!         mod layout;             // 主布局：标题栏 + 三列面板 + 状态栏
//!         pub mod components;     // 列表面板、草稿面板、状态栏、弹窗
//!         pub mod theme;          // 深色 / 浅色主题
//!
//! 列表内容全部来自 App::view（Controller::view() 的快照），
//! View 层不调用 Controller，也不修改任何状态。
//!

mod layout;

pub mod components;
pub mod theme;

pub use layout::render;
