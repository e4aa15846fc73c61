//! Apigee key-value map client

mod error;
mod http;
mod provider;
mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::providers::common::{create_http_client, path_segment};
use crate::types::{ApigeeCredentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub(crate) use types::{ApigeeEntry, ApigeeErrorResponse, ListEntriesResponse};

/// 条目列表单页最大数量
pub(crate) const MAX_PAGE_SIZE_ENTRIES: u32 = 100;

/// Apigee management API client.
///
/// Authenticates every request with `Authorization: Bearer {token}` and scopes
/// all paths to `/v1/organizations/{organization}`.
///
/// # Construction
///
/// ```rust,no_run
/// use kvm_console_provider::{ApigeeCredentials, ApigeeProvider};
///
/// let provider = ApigeeProvider::builder(ApigeeCredentials {
///     organization: "my-org".to_string(),
///     token: "ya29....".to_string(),
/// })
/// .max_retries(2)
/// .build()
/// .unwrap();
/// ```
pub struct ApigeeProvider {
    pub(crate) client: Client,
    pub(crate) credentials: ApigeeCredentials,
    pub(crate) base_url: String,
    pub(crate) max_retries: u32,
}

/// Builder for [`ApigeeProvider`] with configurable endpoint, timeout and retries.
pub struct ApigeeProviderBuilder {
    credentials: ApigeeCredentials,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
}

impl ApigeeProviderBuilder {
    fn new(credentials: ApigeeCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: 0,
        }
    }

    /// Override the API root (default: `https://apigee.googleapis.com`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the uniform per-request timeout (default: 2000 ms).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of automatic retries for transient errors (default: 0).
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Build the [`ApigeeProvider`] instance.
    pub fn build(self) -> Result<ApigeeProvider> {
        Ok(ApigeeProvider {
            client: create_http_client(self.timeout)?,
            credentials: self.credentials,
            base_url: self.base_url,
            max_retries: self.max_retries,
        })
    }
}

impl ApigeeProvider {
    /// Creates a client with default settings (2000 ms timeout, no retries).
    pub fn new(credentials: ApigeeCredentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    /// Returns a builder for customizing the client configuration.
    pub fn builder(credentials: ApigeeCredentials) -> ApigeeProviderBuilder {
        ApigeeProviderBuilder::new(credentials)
    }

    /// `/v1/organizations/{org}/environments`
    pub(crate) fn environments_path(&self) -> String {
        format!(
            "/v1/organizations/{}/environments",
            path_segment(&self.credentials.organization)
        )
    }

    /// `…/environments/{env}/keyvaluemaps`
    pub(crate) fn kvms_path(&self, environment: &str) -> String {
        format!(
            "{}/{}/keyvaluemaps",
            self.environments_path(),
            path_segment(environment)
        )
    }

    /// `…/keyvaluemaps/{kvm}/entries`
    pub(crate) fn entries_path(&self, environment: &str, kvm: &str) -> String {
        format!("{}/{}/entries", self.kvms_path(environment), path_segment(kvm))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> ApigeeProvider {
        ApigeeProvider::new(ApigeeCredentials {
            organization: "acme".to_string(),
            token: "t".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn paths_nest_under_organization() {
        let p = provider();
        assert_eq!(p.environments_path(), "/v1/organizations/acme/environments");
        assert_eq!(
            p.kvms_path("test"),
            "/v1/organizations/acme/environments/test/keyvaluemaps"
        );
        assert_eq!(
            p.entries_path("test", "settings"),
            "/v1/organizations/acme/environments/test/keyvaluemaps/settings/entries"
        );
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let p = ApigeeProvider::builder(ApigeeCredentials {
            organization: "acme".to_string(),
            token: String::new(),
        })
        .base_url("http://localhost:8080/")
        .max_retries(3)
        .build()
        .unwrap();
        assert_eq!(p.base_url, "http://localhost:8080");
        assert_eq!(p.max_retries, 3);
    }
}
