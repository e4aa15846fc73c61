//!
//! src/message/mod.rs
//! Message 层：用户意图
//!
//! Event 层把按键翻译成 Message，Update 层消费 Message。
//! Message 只描述“想做什么”，是否可行由 Update 层和 Controller 决定。
//!
//!     AppMessage        // 全局：退出、切换焦点、刷新、导出、帮助
//!     ContentMessage    // 作用于焦点面板的高亮行
//!     ModalMessage      // 弹窗里的输入和确认
//!

mod app;
mod content;
mod modal;

pub use app::AppMessage;
pub use content::ContentMessage;
pub use modal::ModalMessage;
