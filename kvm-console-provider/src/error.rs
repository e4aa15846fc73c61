use serde::{Deserialize, Serialize};

/// Unified error type for all key-value map API operations.
///
/// Variants carry the resource the call was about (environment, KVM or entry name)
/// plus the raw message returned by the gateway, if any. All variants are serializable
/// for structured error reporting.
///
/// # Retryable Errors
///
/// The following variants represent transient failures that may succeed on retry:
/// - [`NetworkError`](Self::NetworkError): network connectivity issues
/// - [`Timeout`](Self::Timeout): request timed out
/// - [`RateLimited`](Self::RateLimited): API rate limit exceeded
///
/// The HTTP client only retries these when the caller configured `max_retries > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Error details.
        detail: String,
    },

    /// The HTTP request did not complete within the configured timeout.
    Timeout {
        /// Error details.
        detail: String,
    },

    /// The bearer token is missing, invalid or expired.
    InvalidCredentials {
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// The token is valid but lacks permission for the requested operation.
    PermissionDenied {
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// The environment does not exist in the organization.
    EnvironmentNotFound {
        /// Environment name.
        environment: String,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// The key-value map does not exist in the environment.
    KvmNotFound {
        /// KVM name.
        kvm: String,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// A key-value map with the same name already exists.
    KvmExists {
        /// KVM name.
        kvm: String,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// The entry does not exist in the key-value map.
    EntryNotFound {
        /// Entry name.
        entry: String,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// An entry with the same name already exists in the key-value map.
    EntryExists {
        /// Entry name.
        entry: String,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// A request parameter was rejected (empty name, oversized value, ...).
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The API rate limit has been exceeded (HTTP 429 or `RESOURCE_EXHAUSTED`).
    RateLimited {
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Original error message from the gateway, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the gateway's response.
    ParseError {
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the gateway.
    ///
    /// This is a catch-all for statuses not yet mapped to a specific variant.
    Unknown {
        /// Raw status or HTTP code, if available.
        raw_code: Option<String>,
        /// Raw error message.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、资源不存在等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::EnvironmentNotFound { .. }
                | Self::KvmNotFound { .. }
                | Self::KvmExists { .. }
                | Self::EntryNotFound { .. }
                | Self::EntryExists { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// 凭证缺失或无权限
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::PermissionDenied { .. }
        )
    }

    /// 网络、超时与限流错误可以重试
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkError { .. } | Self::Timeout { .. } | Self::RateLimited { .. }
        )
    }
}

fn with_raw(f: &mut std::fmt::Formatter<'_>, head: &str, raw: Option<&String>) -> std::fmt::Result {
    match raw {
        Some(msg) => write!(f, "{head}: {msg}"),
        None => f.write_str(head),
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail } => write!(f, "Network error: {detail}"),
            Self::Timeout { detail } => write!(f, "Request timeout: {detail}"),
            Self::InvalidCredentials { raw_message } => {
                with_raw(f, "Missing or invalid token", raw_message.as_ref())
            }
            Self::PermissionDenied { raw_message } => {
                with_raw(f, "Permission denied", raw_message.as_ref())
            }
            Self::EnvironmentNotFound {
                environment,
                raw_message,
            } => with_raw(
                f,
                &format!("Environment '{environment}' not found"),
                raw_message.as_ref(),
            ),
            Self::KvmNotFound { kvm, raw_message } => {
                with_raw(f, &format!("KVM '{kvm}' not found"), raw_message.as_ref())
            }
            Self::KvmExists { kvm, .. } => write!(f, "KVM '{kvm}' already exists"),
            Self::EntryNotFound { entry, raw_message } => with_raw(
                f,
                &format!("Entry '{entry}' not found"),
                raw_message.as_ref(),
            ),
            Self::EntryExists { entry, .. } => write!(f, "Entry '{entry}' already exists"),
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::RateLimited { retry_after, .. } => {
                if let Some(secs) = retry_after {
                    write!(f, "Rate limited (retry after {secs}s)")
                } else {
                    f.write_str("Rate limited")
                }
            }
            Self::ParseError { detail } => write!(f, "Parse error: {detail}"),
            Self::SerializationError { detail } => write!(f, "Serialization error: {detail}"),
            Self::Unknown {
                raw_code,
                raw_message,
            } => match raw_code {
                Some(code) => write!(f, "{raw_message} ({code})"),
                None => f.write_str(raw_message),
            },
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
