//! Gateway client implementations

/// Shared utilities used by provider implementations.
pub mod common;

mod apigee;

pub use apigee::{ApigeeProvider, ApigeeProviderBuilder};
