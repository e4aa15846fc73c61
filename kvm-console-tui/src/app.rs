//!
//! app.rs
//! 应用主循环
//!
//! loop {
//!     terminal.draw(...)                  // 渲染 UI
//!     if app.should_quit { break }
//!     while let Ok(outcome) = rx.try_recv() {
//!         app.apply(outcome)              // 远程调用结果回到 Controller
//!     }
//!     if let Some(event) = poll_event() { // 最多等待 50ms
//!         update(app, handle_event(event, app))
//!     }
//!     tasks.spawn(app.take_effects())     // 新产生的远程调用交给 tokio
//! }
//!
//! 主循环是同步的，Controller 只在这里被修改；tokio 任务只持有 EffectRunner。
//!

use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;

use kvm_console_core::Outcome;

use crate::backend::TaskRunner;
use crate::event;
use crate::model::App;
use crate::update;
use crate::util::Term;
use crate::view;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// 运行应用主循环
pub fn run(
    terminal: &mut Term,
    app: &mut App,
    tasks: &TaskRunner,
    outcomes: &mut UnboundedReceiver<Outcome>,
) -> Result<()> {
    // start() 产生的首批请求
    tasks.spawn(app.take_effects());

    loop {
        terminal.draw(|frame| {
            view::render(app, frame);
        })?;

        if app.should_quit {
            break;
        }

        while let Ok(outcome) = outcomes.try_recv() {
            app.apply(outcome);
        }

        if let Some(event) = event::poll_event(POLL_INTERVAL)? {
            let msg = event::handle_event(event, app);
            update::update(app, msg);
        }

        tasks.spawn(app.take_effects());
    }

    Ok(())
}
