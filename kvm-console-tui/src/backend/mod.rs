//!
//! src/backend/mod.rs
//! Backend 层：与 UI 解耦的服务
//!
//!
//! 有模块结构：
//!     src/backend/mod.rs
//!         mod config_service;     // 启动配置（JSON 文件 + 环境变量）
//!         mod export_writer;      // 导出文件写入
//!         mod task_runner;        // 远程调用调度（tokio 任务 + mpsc）
//!
//!
//! 远程调用数据流：
//!     update 层调用 Controller::dispatch()，得到 Vec<Effect>
//!         ↓
//!     app.rs 把 Effect 交给 TaskRunner::spawn()，每个 Effect 一个 tokio 任务
//!         ↓
//!     任务结束后 Outcome 经 channel 回到主循环
//!         ↓
//!     主循环调用 Controller::apply()，可能产生新的 Effect（例如变更后的刷新）
//!
//! Controller 只在主循环线程上被修改，远程任务不持有任何 UI 状态。
//!

mod config_service;
mod export_writer;
mod task_runner;

pub use config_service::FileConfigService;
pub use export_writer::write_export;
pub use task_runner::TaskRunner;
