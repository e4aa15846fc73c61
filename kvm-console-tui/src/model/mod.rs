//!
//! src/model/mod.rs
//! Model 层：应用状态定义
//!
//! 有模块结构：
//!     src/model/mod.rs
//!         mod app;            // 主应用状态
//!         mod focus;          // 焦点面板（环境 / KVM / 条目 / 草稿）
//!
//!         pub mod state;      // 弹窗状态
//!
//!
//! 与业务相关的状态（选择、分页、列表、草稿、提示）全部由
//! kvm_console_core::Controller 持有。App 只额外保存纯 UI 状态：
//!
//!     App {
//!         should_quit,            // 是否退出
//!         focus,                  // 焦点面板
//!         controller,             // 业务状态的唯一所有者
//!         view,                   // Controller::view() 的快照，供 View 层渲染
//!         highlights,             // 每个面板当前页内的高亮行
//!         status,                 // 状态栏提示
//!         modal,                  // 当前弹窗
//!         export_dir,             // 导出目录
//!         pending,                // 待执行的 Effect
//!     }
//!
//! 每次 dispatch / apply 之后：
//!     1. 新的 Effect 进入 pending，由主循环交给 TaskRunner
//!     2. 重建 view，焦点和高亮收回到可见范围
//!     3. 取走 Controller 的提示，决定进状态栏还是弹窗
//!

mod app;
mod focus;

pub mod state;

pub use app::App;
pub use focus::FocusPanel;
