//! Command model for the console shell
//!
//! Commands are declared as data ([`CommandSpec`], [`OptionSpec`]) and
//! registered with an execution [`Action`] and optional positional
//! completers. The [`CommandRegistry`] resolves names, dispatches execution
//! and assembles the shell-wide completer; [`Session`] is the context every
//! action runs against.

pub mod builtin;
mod registry;
mod session;
mod spec;

pub use registry::{Action, Command, CommandRegistry};
pub use session::{LogReloadHandle, Session};
pub use spec::{CommandSpec, OptionSpec};
