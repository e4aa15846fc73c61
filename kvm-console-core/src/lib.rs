//! KVM Console Core Library
//!
//! Client-side state for browsing and editing Apigee key-value maps:
//! - Pagination helper and per-level cursors
//! - Hierarchical selection (environment → KVM)
//! - Entry draft buffer with pair and bulk JSON input
//! - Controller folding commands and remote outcomes into a renderable view
//!
//! The library performs no I/O on its own. Remote calls are returned as [`Effect`]s
//! and executed by an [`EffectRunner`] against any [`KvmProvider`](kvm_console_provider::KvmProvider),
//! so the same controller drives the terminal front end and the tests.

pub mod bulk;
pub mod controller;
pub mod draft;
pub mod error;
pub mod export;
pub mod notice;
pub mod pagination;
pub mod selection;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use controller::{
    Command, ConsoleView, Controller, Effect, EffectRunner, ListView, Outcome, RequestToken, drive,
};
pub use draft::{DraftLine, EntryDraftBuffer, InputMode};
pub use error::{CoreError, CoreResult, ValidationError};
pub use export::ExportedEntries;
pub use notice::{Notice, NoticeLevel};
pub use selection::ListLevel;
