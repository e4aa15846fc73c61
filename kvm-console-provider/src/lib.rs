//! # kvm-console-provider
//!
//! A typed client for the Apigee key-value map (KVM) management API: environments,
//! the KVMs inside an environment, and the name/value entries inside a KVM.
//!
//! ## Feature Flags
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for static builds and cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kvm_console_provider::{ApigeeCredentials, ApigeeProvider, CreateEntryRequest, KvmProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = ApigeeProvider::new(ApigeeCredentials {
//!         organization: "my-org".to_string(),
//!         token: "ya29....".to_string(),
//!     })?;
//!
//!     for env in provider.list_environments().await? {
//!         println!("{}", env.name);
//!     }
//!
//!     provider
//!         .create_entry("test", "settings", &CreateEntryRequest::new("timeout", "30"))
//!         .await?;
//!
//!     // Entries come back sorted by name, across all remote pages
//!     for entry in provider.list_entries("test", "settings").await? {
//!         println!("{} = {}", entry.name, entry.value);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, ProviderError>`](ProviderError). Google error
//! statuses are mapped to structured variants:
//!
//! - [`ProviderError::InvalidCredentials`]: `UNAUTHENTICATED` / HTTP 401
//! - [`ProviderError::KvmNotFound`] / [`ProviderError::EntryNotFound`]: `NOT_FOUND`
//! - [`ProviderError::KvmExists`] / [`ProviderError::EntryExists`]: `ALREADY_EXISTS`
//! - [`ProviderError::RateLimited`]: `RESOURCE_EXHAUSTED` / HTTP 429 (retryable)
//!
//! Transient errors (`NetworkError`, `Timeout`, `RateLimited`) are retried with
//! exponential backoff when the client is built with `max_retries > 0`.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export core trait only (internal traits are not exported)
pub use traits::KvmProvider;

// Re-export types
pub use types::{
    ApigeeCredentials, BatchCreateFailure, BatchCreateResult, CreateEntryRequest,
    CreateKvmRequest, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, Entry, Environment, KeyValueMap,
};

// Re-export log helpers so callers can sanitize their own output
pub use utils::log_sanitizer;

// Re-export the concrete client
pub use providers::{ApigeeProvider, ApigeeProviderBuilder};
