//! Apigee error mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError};

use super::ApigeeProvider;

/// Google API error status mapping.
/// The `status` string wins; the HTTP code is the fallback when the body
/// carried no envelope.
/// Reference: <https://cloud.google.com/apis/design/errors#handling_errors>
impl ProviderErrorMapper for ApigeeProvider {
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        let status = raw.status.as_deref();

        match (status, raw.http_status) {
            (Some("UNAUTHENTICATED"), _) | (None, 401) => ProviderError::InvalidCredentials {
                raw_message: Some(raw.message),
            },

            (Some("PERMISSION_DENIED"), _) | (None, 403) => ProviderError::PermissionDenied {
                raw_message: Some(raw.message),
            },

            // 最深一级路径资源不存在
            (Some("NOT_FOUND"), _) | (None, 404) => {
                let raw_message = Some(raw.message.clone());
                match context {
                    ErrorContext {
                        entry: Some(entry), ..
                    } => ProviderError::EntryNotFound { entry, raw_message },
                    ErrorContext { kvm: Some(kvm), .. } => {
                        ProviderError::KvmNotFound { kvm, raw_message }
                    }
                    ErrorContext {
                        environment: Some(environment),
                        ..
                    } => ProviderError::EnvironmentNotFound {
                        environment,
                        raw_message,
                    },
                    _ => self.unknown_error(raw),
                }
            }

            (Some("ALREADY_EXISTS"), _) | (None, 409) => {
                let raw_message = Some(raw.message.clone());
                match context {
                    ErrorContext {
                        creating: Some(entry),
                        kvm: Some(_),
                        ..
                    } => ProviderError::EntryExists { entry, raw_message },
                    ErrorContext {
                        creating: Some(kvm),
                        ..
                    } => ProviderError::KvmExists { kvm, raw_message },
                    _ => self.unknown_error(raw),
                }
            }

            (Some("INVALID_ARGUMENT"), _) | (None, 400) => ProviderError::InvalidParameter {
                param: if context.creating.is_some() {
                    "name".to_string()
                } else {
                    "request".to_string()
                },
                detail: raw.message,
            },

            (Some("RESOURCE_EXHAUSTED"), _) | (_, 429) => ProviderError::RateLimited {
                retry_after: None,
                raw_message: Some(raw.message),
            },

            (_, 502..=504) => ProviderError::NetworkError {
                detail: format!("HTTP {}: {}", raw.http_status, raw.message),
            },

            _ => self.unknown_error(raw),
        }
    }
}
