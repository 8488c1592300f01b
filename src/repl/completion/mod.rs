//! Completion system for the cosh REPL
//!
//! The completion system decides which candidates are valid at the cursor
//! position of a partially typed command line, honoring the shell grammar:
//! command name, then options (some consuming a value token), then
//! positional arguments.
//!
//! # Architecture
//!
//! - **Completer**: the capability trait: given a partial token, which full
//!   tokens match? Fixed-set, pass-through and aggregate variants live in
//!   `completer`; the engine itself implements the trait too, so engines
//!   nest.
//! - **OptionTable**: immutable name/alias lookup built from a command's
//!   declared option descriptors.
//! - **ArgumentList / LineTokenizer**: cursor-aware tokenization of the
//!   buffer; failures degrade to a single whole-buffer token instead of
//!   surfacing.
//! - **Delimiter policy**: escape-aware separator detection and trailing
//!   separator trimming.
//! - **ArgumentCompleter**: the engine that walks the grammar, validates
//!   tokens left of the cursor (strict mode), dispatches the slot's
//!   completer and maps the result back to buffer coordinates.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use cosh::command::{CommandSpec, OptionSpec};
//! use cosh::repl::completion::{ArgumentCompleter, StringsCompleter};
//!
//! let spec = CommandSpec::new("log", "set", "Set the session log level")
//!     .option(OptionSpec::flag("--quiet", "No confirmation output"))
//!     .arg("<level>");
//! let engine = ArgumentCompleter::new(
//!     &spec,
//!     vec![Arc::new(StringsCompleter::new(["debug", "info", "warn"]))],
//! );
//!
//! let mut candidates = Vec::new();
//! let pos = engine.complete("log:set d", 9, &mut candidates);
//! assert_eq!(pos, Some(8));
//! assert_eq!(candidates, vec!["debug"]);
//! ```

mod argument_list;
mod completer;
mod delimiter;
mod engine;
mod options;

pub use argument_list::{ArgumentList, LineTokenizer, ShellTokenizer};
pub use completer::{AggregateCompleter, Completer, NullCompleter, StringsCompleter};
pub use delimiter::{is_delimiter, is_escaped, trim_trailing_delimiters};
pub use engine::ArgumentCompleter;
pub use options::{HELP_OPTION, OptionTable};
