//! Error handling module for cosh.
//!
//! This module provides error handling for the console shell with:
//! - A single top-level error type wrapping specific error kinds
//! - Manual `Display` implementations for user-facing messages
//! - A crate-wide `Result` alias
//!
//! Note that the completion engine does not use these types: per its
//! contract, a completion call either produces an insertion offset or
//! `None`, and internal failures (such as tokenizer errors) degrade to
//! `None` instead of surfacing here.

pub mod kinds;

// Re-export commonly used types
pub use kinds::{CommandError, ConfigError, CoshError, ParseError, Result};
