//! Input parsing for the console shell
//!
//! The shell's grammar is deliberately small: one command per line, the
//! command name first, then options and positional arguments. This module
//! provides the word-level lexer shared by command execution and by the
//! completion system's tokenizer.

mod line_lexer;

pub use line_lexer::{LineLexer, LineToken};
