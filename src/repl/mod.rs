//! REPL (Read-Eval-Print Loop) engine for cosh
//!
//! This module provides the interactive shell interface:
//! - Line editing with reedline
//! - Command history with persistence
//! - TAB completion backed by the grammar-aware completion engine
//! - History-based inline hints
//! - Quote-aware multi-line continuation
//! - Syntax highlighting
//!
//! The completion engine itself lives in [`completion`] and is independent
//! of the line editor; everything else here adapts it (and the command
//! registry) to reedline's traits.

mod completer;
pub mod completion;
mod engine;
mod highlighter;
mod hinter;
mod prompt;
mod shared_state;
mod validator;

pub use completer::ConsoleCompleter;
pub use engine::ReplEngine;
pub use highlighter::ConsoleHighlighter;
pub use hinter::ConsoleHinter;
pub use prompt::ConsolePrompt;
pub use shared_state::SharedState;
pub use validator::ConsoleValidator;
