//! KVM Console TUI
//!
//! ## 架构
//!
//! 采用 Elm Architecture (TEA) 模式：
//! - **Model**: 应用状态 (`model/`)，业务状态由 `kvm_console_core::Controller` 持有
//! - **Message**: 事件消息 (`message/`)
//! - **Update**: 状态更新 (`update/`)
//! - **View**: UI 渲染 (`view/`)
//! - **Event**: 输入处理 (`event/`)
//! - **Backend**: 配置、远程任务、导出 (`backend/`)
//!
//! 启动顺序：
//!     1. 日志写入 `{data_dir}/kvm-console/kvm-console.log`（终端被 TUI 占用）
//!     2. 读取配置，构建 Apigee 客户端
//!     3. 创建 tokio 运行时和 TaskRunner
//!     4. 初始化终端，进入 app::run 主循环
//!     5. 无论成功与否，都恢复终端

mod app;
mod backend;
mod event;
mod message;
mod model;
mod update;
mod util;
mod view;

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kvm_console_core::{Controller, EffectRunner};

use backend::{FileConfigService, TaskRunner};
use util::{init_terminal, restore_terminal};

fn main() -> Result<()> {
    let log_path = init_tracing();

    // 1. 配置和客户端
    let config_service = FileConfigService::from_env();
    let config = config_service.load()?;
    view::theme::set_theme(config.theme);
    let provider = config.build_provider()?;
    tracing::info!(
        "Starting KVM console for organization {} (config: {})",
        config.organization,
        config_service.path().display()
    );
    if let Some(path) = &log_path {
        tracing::info!("Logging to {}", path.display());
    }

    // 2. 远程调用在 tokio 运行时上执行，主循环保持同步
    let runtime = tokio::runtime::Runtime::new().context("Cannot start tokio runtime")?;
    let runner = EffectRunner::new(Arc::new(provider));
    let (tasks, mut outcomes) = TaskRunner::new(runtime.handle().clone(), runner.clone());

    // 3. 创建应用实例
    let mut app = model::App::new(Controller::new(runner.organization()), config.export_dir());
    app.start();

    // 4. 运行主循环
    let mut terminal = init_terminal()?;
    let result = app::run(&mut terminal, &mut app, &tasks, &mut outcomes);

    // 5. 恢复终端（无论成功失败都执行）
    restore_terminal(&mut terminal)?;

    // 未完成的请求随运行时一起丢弃
    runtime.shutdown_background();
    tracing::info!("KVM console exited");

    result
}

/// 日志写文件；目录不可用时不记录日志
fn init_tracing() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("kvm-console");
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join("kvm-console.log");
    let file = File::options().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    Some(path)
}
