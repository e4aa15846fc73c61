use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============ Resource Types ============

/// An Apigee environment, identified only by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Environment {
    /// Environment name (e.g. `"test"`, `"prod"`).
    pub name: String,
}

impl Environment {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A key-value map within an environment.
///
/// `index` is assigned client-side from the position in the fetched list and is
/// only meaningful for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValueMap {
    /// Position in the fetched list.
    pub index: usize,
    /// KVM name, unique within an environment.
    pub name: String,
    /// Whether the map is encrypted. Fixed at creation.
    pub encrypted: bool,
}

/// A single name/value entry of a key-value map.
///
/// Serializes as `{"name": ..., "value": ...}`, the same shape the bulk importer
/// accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry name, unique within a KVM.
    pub name: String,
    /// Entry value.
    pub value: String,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Entries are identified by their name.
    pub fn id(&self) -> &str {
        &self.name
    }
}

// ============ Request Types ============

/// Request payload for creating a key-value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateKvmRequest {
    /// KVM name.
    pub name: String,
    /// Always `true` when created through this crate.
    pub encrypted: bool,
}

impl CreateKvmRequest {
    /// Build an encrypted KVM request.
    pub fn encrypted(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            encrypted: true,
        }
    }
}

/// Request payload for creating an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEntryRequest {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: String,
}

impl CreateEntryRequest {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ============ Batch Operation Types ============

/// Result of a batch entry creation.
///
/// Contains both successfully created entries and any per-entry failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateResult {
    /// Number of entries successfully created.
    pub success_count: usize,
    /// Number of entries that failed to create.
    pub failed_count: usize,
    /// Successfully created entries.
    pub created_entries: Vec<Entry>,
    /// Details about each failed creation.
    pub failures: Vec<BatchCreateFailure>,
}

/// Information about a single failed entry creation in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCreateFailure {
    /// Index of the failed request in the original request slice.
    pub request_index: usize,
    /// Name of the entry that failed.
    pub entry_name: String,
    /// Human-readable reason for the failure.
    pub reason: String,
}

// ============ Client Configuration ============

/// Default Apigee management API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://apigee.googleapis.com";

/// Default uniform request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

/// Organization plus bearer token used for every request.
#[derive(Clone, Serialize, Deserialize)]
pub struct ApigeeCredentials {
    /// Apigee organization identifier.
    pub organization: String,
    /// OAuth bearer token. May be empty; the gateway then answers `UNAUTHENTICATED`.
    pub token: String,
}

impl std::fmt::Debug for ApigeeCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApigeeCredentials")
            .field("organization", &self.organization)
            .field("token", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_as_name_value() {
        let entry = Entry::new("a", "1");
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"name":"a","value":"1"}"#);
        assert_eq!(entry.id(), "a");
    }

    #[test]
    fn create_kvm_request_is_encrypted() {
        let req = CreateKvmRequest::encrypted("settings");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["name"], "settings");
        assert_eq!(json["encrypted"], true);
    }

    #[test]
    fn credentials_debug_hides_token() {
        let creds = ApigeeCredentials {
            organization: "acme".to_string(),
            token: "ya29.secret".to_string(),
        };
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("acme"));
        assert!(!dbg.contains("ya29.secret"));
    }
}
