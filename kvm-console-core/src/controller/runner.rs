//! 副作用执行器

use std::sync::Arc;

use kvm_console_provider::{CreateKvmRequest, KvmProvider};

use super::Controller;
use super::effect::{Effect, Outcome};

/// 针对 [`KvmProvider`] 执行 [`Effect`]
#[derive(Clone)]
pub struct EffectRunner {
    provider: Arc<dyn KvmProvider>,
}

impl EffectRunner {
    #[must_use]
    pub fn new(provider: Arc<dyn KvmProvider>) -> Self {
        Self { provider }
    }

    pub fn organization(&self) -> &str {
        self.provider.organization()
    }

    /// 执行单个副作用；失败包含在 [`Outcome`] 中，不会向上返回
    pub async fn run(&self, effect: Effect) -> Outcome {
        log::debug!("Running effect: {effect:?}");
        let provider = &self.provider;
        match effect {
            Effect::ListEnvironments { token } => Outcome::EnvironmentsListed {
                token,
                result: provider.list_environments().await,
            },
            Effect::ListKvms { token, environment } => Outcome::KvmsListed {
                token,
                result: provider.list_kvms(&environment).await,
            },
            Effect::ListEntries {
                token,
                environment,
                kvm,
            } => Outcome::EntriesListed {
                token,
                result: provider.list_entries(&environment, &kvm).await,
            },
            Effect::CreateKvm { environment, name } => {
                let result = provider
                    .create_kvm(&environment, &CreateKvmRequest::encrypted(name.clone()))
                    .await;
                Outcome::KvmCreated {
                    environment,
                    name,
                    result,
                }
            }
            Effect::DeleteKvm { environment, name } => {
                let result = provider.delete_kvm(&environment, &name).await;
                Outcome::KvmDeleted {
                    environment,
                    name,
                    result,
                }
            }
            Effect::CreateEntries {
                environment,
                kvm,
                requests,
            } => {
                let result = provider
                    .batch_create_entries(&environment, &kvm, &requests)
                    .await;
                Outcome::EntriesCreated {
                    environment,
                    kvm,
                    result,
                }
            }
            Effect::DeleteEntry {
                environment,
                kvm,
                name,
            } => {
                let result = provider.delete_entry(&environment, &kvm, &name).await;
                Outcome::EntryDeleted {
                    environment,
                    kvm,
                    name,
                    result,
                }
            }
        }
    }
}

/// 运行副作用直到不再产生后续副作用
///
/// 同一轮的副作用并发执行，结果按发起顺序应用。
pub async fn drive(controller: &mut Controller, runner: &EffectRunner, effects: Vec<Effect>) {
    let mut pending = effects;
    while !pending.is_empty() {
        let outcomes =
            futures::future::join_all(pending.into_iter().map(|effect| runner.run(effect))).await;
        pending = outcomes
            .into_iter()
            .flat_map(|outcome| controller.apply(outcome))
            .collect();
    }
}
