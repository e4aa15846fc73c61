//! 远程任务调度
//!
//! 每个 [`Effect`] 作为独立的 tokio 任务执行，结果通过 channel 回到主循环。

use tokio::runtime::Handle;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use kvm_console_core::{Effect, EffectRunner, Outcome};

pub struct TaskRunner {
    handle: Handle,
    runner: EffectRunner,
    tx: UnboundedSender<Outcome>,
}

impl TaskRunner {
    /// 创建调度器及结果接收端
    pub fn new(handle: Handle, runner: EffectRunner) -> (Self, UnboundedReceiver<Outcome>) {
        let (tx, rx) = unbounded_channel();
        (Self { handle, runner, tx }, rx)
    }

    pub fn spawn(&self, effects: Vec<Effect>) {
        for effect in effects {
            let runner = self.runner.clone();
            let tx = self.tx.clone();
            self.handle.spawn(async move {
                let outcome = runner.run(effect).await;
                if tx.send(outcome).is_err() {
                    tracing::debug!("UI loop has exited, dropping outcome");
                }
            });
        }
    }
}
