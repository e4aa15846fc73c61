//!
//! src/util/mod.rs
//! Util 层：终端的初始化和恢复
//!
//!     · Raw Mode：关闭行缓冲和回显，每个按键立即送达
//!     · Alternate Screen：退出后恢复原有终端内容
//!     · Bracketed Paste：批量 JSON 粘贴作为一个事件到达
//!
//! 无论 app::run 成功与否，main.rs 都会先调用 restore_terminal 再返回。
//!

mod terminal;

pub use terminal::{Term, init_terminal, restore_terminal};
