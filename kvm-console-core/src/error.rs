//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use kvm_console_provider::ProviderError;

use crate::notice::NoticeLevel;

/// Input rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ValidationError {
    /// Name is empty after trimming
    #[error("Name must not be empty")]
    EmptyName,

    /// Value is empty after trimming
    #[error("Value must not be empty")]
    EmptyValue,

    /// Bulk text failed the shape check
    #[error(r#"Bulk input must be a JSON array of {{"name": ..., "value": ...}} objects"#)]
    BulkShape,

    /// Bulk text passed the shape check but failed structural parsing
    #[error("Bulk input could not be parsed: {0}")]
    BulkParse(String),

    /// A bulk element has an empty name or value
    #[error("Bulk item {index} has an empty name or value")]
    BulkEmptyField { index: usize },

    /// A draft line failed re-validation at commit time
    #[error("Draft line {line} ('{name}') needs a non-empty name and value")]
    InvalidLine { line: usize, name: String },

    /// Nothing staged to commit
    #[error("The draft has no lines to commit")]
    EmptyDraft,

    /// Draft line index out of range
    #[error("Draft line {0} does not exist")]
    NoSuchLine(usize),

    /// Operation needs a selected environment
    #[error("No environment selected")]
    NoEnvironment,

    /// Operation needs a selected key-value map
    #[error("No key-value map selected")]
    NoKvm,
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Missing or rejected credential
    #[error("Authentication failed: {0}")]
    Auth(ProviderError),

    /// Input validation error
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A remote list/create/delete call failed
    #[error("{operation} failed: {source}")]
    RemoteOperation {
        operation: String,
        source: ProviderError,
    },

    /// Serializing or writing an export failed
    #[error("Export failed: {0}")]
    Export(String),
}

impl CoreError {
    /// Classify a provider failure for `operation`.
    ///
    /// Credential failures become [`CoreError::Auth`] regardless of the operation.
    pub fn remote(operation: impl Into<String>, error: ProviderError) -> Self {
        if error.is_auth_failure() {
            Self::Auth(error)
        } else {
            Self::RemoteOperation {
                operation: operation.into(),
                source: error,
            }
        }
    }

    /// Whether it is expected behavior (user input, resource does not exist, etc.) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Auth(_) | Self::Validation(_) => true,
            Self::RemoteOperation { source, .. } => source.is_expected(),
            Self::Export(_) => false,
        }
    }

    /// 用户提示级别
    #[must_use]
    pub fn notice_level(&self) -> NoticeLevel {
        match self {
            Self::Auth(_) => NoticeLevel::Blocking,
            Self::Validation(_) => NoticeLevel::Warning,
            Self::RemoteOperation { .. } | Self::Export(_) => NoticeLevel::Error,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
