//! 测试辅助模块
//!
//! 提供内存版 [`KvmProvider`] 和便捷的 Controller 工厂方法。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use kvm_console_provider::{
    CreateEntryRequest, CreateKvmRequest, Entry, Environment, KeyValueMap, KvmProvider,
    ProviderError, Result,
};
use tokio::sync::RwLock;

use crate::controller::{Controller, EffectRunner, drive};

// ===== MockKvmProvider =====

pub const TEST_ORG: &str = "acme";

/// 内存版 KVM 存储
///
/// 条目按插入顺序保存、按插入顺序返回，用于验证 Controller 的排序。
pub struct MockKvmProvider {
    environments: RwLock<Vec<String>>,
    kvms: RwLock<HashMap<String, Vec<String>>>,
    entries: RwLock<HashMap<(String, String), Vec<Entry>>>,
    /// 按操作名注入错误，例如 `"list_environments"`
    failures: RwLock<HashMap<String, ProviderError>>,
    /// 创建这些名称的条目时返回错误
    rejected_entries: RwLock<HashMap<String, ProviderError>>,
    calls: RwLock<Vec<String>>,
}

impl MockKvmProvider {
    pub fn new() -> Self {
        Self {
            environments: RwLock::new(Vec::new()),
            kvms: RwLock::new(HashMap::new()),
            entries: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            rejected_entries: RwLock::new(HashMap::new()),
            calls: RwLock::new(Vec::new()),
        }
    }

    pub async fn add_environment(&self, name: &str) {
        self.environments.write().await.push(name.to_string());
        self.kvms.write().await.entry(name.to_string()).or_default();
    }

    pub async fn add_kvm(&self, environment: &str, name: &str) {
        self.kvms
            .write()
            .await
            .entry(environment.to_string())
            .or_default()
            .push(name.to_string());
        self.entries
            .write()
            .await
            .entry((environment.to_string(), name.to_string()))
            .or_default();
    }

    pub async fn add_entry(&self, environment: &str, kvm: &str, name: &str, value: &str) {
        self.entries
            .write()
            .await
            .entry((environment.to_string(), kvm.to_string()))
            .or_default()
            .push(Entry::new(name, value));
    }

    pub async fn fail(&self, operation: &str, error: ProviderError) {
        self.failures
            .write()
            .await
            .insert(operation.to_string(), error);
    }

    pub async fn reject_entry(&self, name: &str, error: ProviderError) {
        self.rejected_entries
            .write()
            .await
            .insert(name.to_string(), error);
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn stored_entries(&self, environment: &str, kvm: &str) -> Vec<Entry> {
        self.entries
            .read()
            .await
            .get(&(environment.to_string(), kvm.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    async fn record(&self, operation: &str) -> Result<()> {
        self.calls.write().await.push(operation.to_string());
        match self.failures.read().await.get(operation) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl KvmProvider for MockKvmProvider {
    fn organization(&self) -> &str {
        TEST_ORG
    }

    async fn list_environments(&self) -> Result<Vec<Environment>> {
        self.record("list_environments").await?;
        Ok(self
            .environments
            .read()
            .await
            .iter()
            .map(Environment::new)
            .collect())
    }

    async fn list_kvms(&self, environment: &str) -> Result<Vec<KeyValueMap>> {
        self.record("list_kvms").await?;
        let kvms = self.kvms.read().await;
        let names = kvms
            .get(environment)
            .ok_or_else(|| ProviderError::EnvironmentNotFound {
                environment: environment.to_string(),
                raw_message: None,
            })?;
        Ok(names
            .iter()
            .enumerate()
            .map(|(index, name)| KeyValueMap {
                index,
                name: name.clone(),
                encrypted: true,
            })
            .collect())
    }

    async fn create_kvm(&self, environment: &str, req: &CreateKvmRequest) -> Result<()> {
        self.record("create_kvm").await?;
        let exists = self
            .kvms
            .read()
            .await
            .get(environment)
            .is_some_and(|names| names.contains(&req.name));
        if exists {
            return Err(ProviderError::KvmExists {
                kvm: req.name.clone(),
                raw_message: None,
            });
        }
        self.add_kvm(environment, &req.name).await;
        Ok(())
    }

    async fn delete_kvm(&self, environment: &str, name: &str) -> Result<()> {
        self.record("delete_kvm").await?;
        let mut kvms = self.kvms.write().await;
        let names = kvms.entry(environment.to_string()).or_default();
        let before = names.len();
        names.retain(|n| n != name);
        if names.len() == before {
            return Err(ProviderError::KvmNotFound {
                kvm: name.to_string(),
                raw_message: None,
            });
        }
        self.entries
            .write()
            .await
            .remove(&(environment.to_string(), name.to_string()));
        Ok(())
    }

    async fn list_entries(&self, environment: &str, kvm: &str) -> Result<Vec<Entry>> {
        self.record("list_entries").await?;
        self.entries
            .read()
            .await
            .get(&(environment.to_string(), kvm.to_string()))
            .cloned()
            .ok_or_else(|| ProviderError::KvmNotFound {
                kvm: kvm.to_string(),
                raw_message: None,
            })
    }

    async fn create_entry(
        &self,
        environment: &str,
        kvm: &str,
        req: &CreateEntryRequest,
    ) -> Result<Entry> {
        self.record("create_entry").await?;
        if let Some(err) = self.rejected_entries.read().await.get(&req.name) {
            return Err(err.clone());
        }
        let mut entries = self.entries.write().await;
        let list = entries
            .entry((environment.to_string(), kvm.to_string()))
            .or_default();
        if list.iter().any(|e| e.name == req.name) {
            return Err(ProviderError::EntryExists {
                entry: req.name.clone(),
                raw_message: None,
            });
        }
        let entry = Entry::new(req.name.clone(), req.value.clone());
        list.push(entry.clone());
        Ok(entry)
    }

    async fn delete_entry(&self, environment: &str, kvm: &str, name: &str) -> Result<()> {
        self.record("delete_entry").await?;
        let mut entries = self.entries.write().await;
        let list = entries
            .entry((environment.to_string(), kvm.to_string()))
            .or_default();
        let before = list.len();
        list.retain(|e| e.name != name.trim());
        if list.len() == before {
            return Err(ProviderError::EntryNotFound {
                entry: name.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

// ===== 工厂方法 =====

/// 预置 `dev` / `prod` 两个环境，`prod` 下有 `settings`（含乱序条目）和 `flags`
pub async fn seeded_provider() -> Arc<MockKvmProvider> {
    let provider = Arc::new(MockKvmProvider::new());
    provider.add_environment("dev").await;
    provider.add_environment("prod").await;
    provider.add_kvm("prod", "settings").await;
    provider.add_kvm("prod", "flags").await;
    provider.add_entry("prod", "settings", "b", "2").await;
    provider.add_entry("prod", "settings", "a", "1").await;
    provider
}

/// 创建 Controller 并完成启动拉取
pub async fn started_controller(provider: Arc<MockKvmProvider>) -> (Controller, EffectRunner) {
    let runner = EffectRunner::new(provider);
    let mut controller = Controller::new(runner.organization());
    let effects = controller.start();
    drive(&mut controller, &runner, effects).await;
    (controller, runner)
}
