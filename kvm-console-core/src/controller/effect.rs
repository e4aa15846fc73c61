//! 远程副作用与其结果

use kvm_console_provider::{
    BatchCreateResult, CreateEntryRequest, Entry, Environment, KeyValueMap, ProviderError,
};

use crate::selection::ListLevel;

/// 列表请求令牌
///
/// 每次发起或作废某一级的拉取都会递增该级的 generation，
/// 结果回来时令牌不匹配即视为过期。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    pub level: ListLevel,
    pub generation: u64,
}

/// Controller 请求执行的远程调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ListEnvironments {
        token: RequestToken,
    },
    ListKvms {
        token: RequestToken,
        environment: String,
    },
    ListEntries {
        token: RequestToken,
        environment: String,
        kvm: String,
    },
    CreateKvm {
        environment: String,
        name: String,
    },
    DeleteKvm {
        environment: String,
        name: String,
    },
    CreateEntries {
        environment: String,
        kvm: String,
        requests: Vec<CreateEntryRequest>,
    },
    DeleteEntry {
        environment: String,
        kvm: String,
        name: String,
    },
}

impl Effect {
    /// 列表拉取的令牌；变更操作返回 `None`
    pub fn token(&self) -> Option<RequestToken> {
        match self {
            Self::ListEnvironments { token }
            | Self::ListKvms { token, .. }
            | Self::ListEntries { token, .. } => Some(*token),
            _ => None,
        }
    }
}

/// 远程调用结果，交回 [`Controller::apply`](super::Controller::apply)
#[derive(Debug)]
pub enum Outcome {
    EnvironmentsListed {
        token: RequestToken,
        result: Result<Vec<Environment>, ProviderError>,
    },
    KvmsListed {
        token: RequestToken,
        result: Result<Vec<KeyValueMap>, ProviderError>,
    },
    EntriesListed {
        token: RequestToken,
        result: Result<Vec<Entry>, ProviderError>,
    },
    KvmCreated {
        environment: String,
        name: String,
        result: Result<(), ProviderError>,
    },
    KvmDeleted {
        environment: String,
        name: String,
        result: Result<(), ProviderError>,
    },
    EntriesCreated {
        environment: String,
        kvm: String,
        result: Result<BatchCreateResult, ProviderError>,
    },
    EntryDeleted {
        environment: String,
        kvm: String,
        name: String,
        result: Result<(), ProviderError>,
    },
}
