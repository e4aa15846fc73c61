use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{
    BatchCreateFailure, BatchCreateResult, CreateEntryRequest, CreateKvmRequest, Entry,
    Environment, KeyValueMap,
};

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// HTTP 状态码
    pub http_status: u16,
    /// Google 错误状态（如 `NOT_FOUND`）
    pub status: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(http_status: u16, message: impl Into<String>) -> Self {
        Self {
            http_status,
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(
        http_status: u16,
        status: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            http_status,
            status: Some(status.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 路径上的资源用于 `*NotFound`，`creating` 用于 `*Exists`
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 环境名
    pub environment: Option<String>,
    /// KVM 名
    pub kvm: Option<String>,
    /// 条目名
    pub entry: Option<String>,
    /// 正在创建的资源名（在最深一级路径之下）
    pub creating: Option<String>,
}

impl ErrorContext {
    pub fn environment(env: &str) -> Self {
        Self {
            environment: Some(env.to_string()),
            ..Self::default()
        }
    }

    pub fn kvm(env: &str, kvm: &str) -> Self {
        Self {
            kvm: Some(kvm.to_string()),
            ..Self::environment(env)
        }
    }

    pub fn entry(env: &str, kvm: &str, entry: &str) -> Self {
        Self {
            entry: Some(entry.to_string()),
            ..Self::kvm(env, kvm)
        }
    }

    #[must_use]
    pub fn creating(mut self, name: &str) -> Self {
        self.creating = Some(name.to_string());
        self
    }
}

/// 错误映射 Trait（内部使用）
/// 将网关返回的原始错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            raw_code: Some(raw.status.unwrap_or_else(|| raw.http_status.to_string())),
            raw_message: raw.message,
        }
    }
}

/// KVM 管理 API Trait
///
/// 所有操作都限定在 [`organization`](Self::organization) 指定的组织内。
#[async_trait]
pub trait KvmProvider: Send + Sync {
    /// 当前组织标识
    fn organization(&self) -> &str;

    /// 获取环境列表（保持服务端顺序）
    async fn list_environments(&self) -> Result<Vec<Environment>>;

    /// 获取环境下的 KVM 列表，`index` 按返回顺序分配
    async fn list_kvms(&self, environment: &str) -> Result<Vec<KeyValueMap>>;

    /// 创建 KVM
    async fn create_kvm(&self, environment: &str, req: &CreateKvmRequest) -> Result<()>;

    /// 删除 KVM
    async fn delete_kvm(&self, environment: &str, name: &str) -> Result<()>;

    /// 获取 KVM 的全部条目，按名称升序
    async fn list_entries(&self, environment: &str, kvm: &str) -> Result<Vec<Entry>>;

    /// 创建条目
    async fn create_entry(
        &self,
        environment: &str,
        kvm: &str,
        req: &CreateEntryRequest,
    ) -> Result<Entry>;

    /// 删除条目
    async fn delete_entry(&self, environment: &str, kvm: &str, name: &str) -> Result<()>;

    /// 批量创建条目
    ///
    /// 默认实现按顺序逐条调用 `create_entry()`，单条失败不影响其余条目。
    async fn batch_create_entries(
        &self,
        environment: &str,
        kvm: &str,
        requests: &[CreateEntryRequest],
    ) -> Result<BatchCreateResult> {
        let mut created_entries = Vec::new();
        let mut failures = Vec::new();

        for (i, req) in requests.iter().enumerate() {
            match self.create_entry(environment, kvm, req).await {
                Ok(entry) => created_entries.push(entry),
                Err(e) => {
                    if e.is_expected() {
                        log::warn!("Batch create '{}' failed: {e}", req.name);
                    } else {
                        log::error!("Batch create '{}' failed: {e}", req.name);
                    }
                    failures.push(BatchCreateFailure {
                        request_index: i,
                        entry_name: req.name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(BatchCreateResult {
            success_count: created_entries.len(),
            failed_count: failures.len(),
            created_entries,
            failures,
        })
    }
}
