//! Console Shell Library
//!
//! This library provides the core functionality for cosh, an interactive
//! console shell with scoped commands. It can be used standalone to embed a
//! command console, with grammar-aware TAB completion, into another tool.
//!
//! # Modules
//!
//! - `cli`: Command-line interface and argument parsing
//! - `command`: Declarative command descriptors, registry and built-ins
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `parser`: Escape- and quote-aware line tokenization
//! - `repl`: Interactive REPL engine and the completion system
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use cosh::command::{CommandRegistry, CommandSpec, OptionSpec, builtin};
//! use cosh::repl::completion::{Completer, StringsCompleter};
//!
//! let mut registry = CommandRegistry::new();
//! builtin::install(&mut registry);
//!
//! // Grammar-aware completion across every registered command.
//! let completer = registry.shell_completer();
//! let mut candidates = Vec::new();
//! let pos = completer.complete("log:set d", 9, &mut candidates);
//! assert_eq!(pos, Some(8));
//! assert_eq!(candidates, vec!["debug"]);
//! ```

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod parser;
pub mod repl;

// Re-export commonly used types
pub use command::{Action, CommandRegistry, CommandSpec, OptionSpec, Session};
pub use config::Config;
pub use error::{CoshError, Result};
pub use repl::{ReplEngine, SharedState};
