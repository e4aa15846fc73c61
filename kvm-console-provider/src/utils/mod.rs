//! Utility modules.

/// Log sanitization utilities to prevent token exposure.
pub mod log_sanitizer;
