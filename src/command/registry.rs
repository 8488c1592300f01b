//! Command registry
//!
//! Owns every registered command: its descriptor, its action, and the
//! argument completion engine built from the descriptor at registration
//! time. The registry resolves names (full `scope:name` or unambiguous bare
//! verb), dispatches execution, and assembles the shell-wide completer by
//! aggregating the per-command engines.

use std::sync::Arc;

use tracing::debug;

use crate::error::{CommandError, Result};
use crate::parser::LineLexer;
use crate::repl::completion::{AggregateCompleter, ArgumentCompleter, Completer};

use super::session::Session;
use super::spec::CommandSpec;

/// The execution side of a command.
pub trait Action: Send + Sync {
    /// Run the command.
    ///
    /// # Arguments
    /// * `session` - Execution context
    /// * `registry` - The registry the command was dispatched from (for
    ///   commands that introspect other commands, like help)
    /// * `argv` - Arguments after the command name, quotes and escapes
    ///   resolved
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Output to print, or `None` for silent
    ///   success
    fn run(
        &self,
        session: &Session,
        registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>>;
}

/// A registered command.
pub struct Command {
    spec: CommandSpec,
    action: Box<dyn Action>,
    completer: Arc<ArgumentCompleter>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("spec", &self.spec).finish_non_exhaustive()
    }
}

impl Command {
    /// The command descriptor
    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// The completion engine for this command
    pub fn completer(&self) -> &Arc<ArgumentCompleter> {
        &self.completer
    }
}

/// Registry of all commands known to the shell.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl CommandRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command.
    ///
    /// # Arguments
    /// * `spec` - Command descriptor
    /// * `action` - Execution behavior
    /// * `arg_completers` - Positional completers, in slot order; the last
    ///   one repeats for further slots, and an empty list means every
    ///   positional slot is free-form
    pub fn register(
        &mut self,
        spec: CommandSpec,
        action: Box<dyn Action>,
        arg_completers: Vec<Arc<dyn Completer>>,
    ) {
        debug!(command = %spec.full_name(), "registering command");
        let completer = Arc::new(ArgumentCompleter::new(&spec, arg_completers));
        self.commands.push(Command {
            spec,
            action,
            completer,
        });
    }

    /// All registered command descriptors, in registration order
    pub fn specs(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().map(Command::spec)
    }

    /// Every name commands answer to (full and bare forms)
    pub fn names(&self) -> Vec<String> {
        self.commands
            .iter()
            .flat_map(|c| c.spec.names())
            .collect()
    }

    /// Resolve a command by full name, or by bare verb when unambiguous.
    ///
    /// # Arguments
    /// * `name` - `scope:name` or bare `name`
    ///
    /// # Returns
    /// * `Result<&Command>` - The command, or a not-found/ambiguous error
    pub fn find(&self, name: &str) -> Result<&Command> {
        if let Some(command) = self.commands.iter().find(|c| c.spec.full_name() == name) {
            return Ok(command);
        }

        let matches: Vec<&Command> = self
            .commands
            .iter()
            .filter(|c| c.spec.short_name() == name)
            .collect();
        match matches.len() {
            0 => Err(CommandError::NotFound(name.to_string()).into()),
            1 => Ok(matches[0]),
            _ => Err(CommandError::Ambiguous {
                name: name.to_string(),
                matches: matches.iter().map(|c| c.spec.full_name()).collect(),
            }
            .into()),
        }
    }

    /// Execute one input line.
    ///
    /// # Arguments
    /// * `session` - Execution context
    /// * `line` - The raw input line
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Output to print, or `None` for silence
    ///   (including blank input)
    pub fn execute(&self, session: &Session, line: &str) -> Result<Option<String>> {
        let tokens = LineLexer::tokenize(line)?;
        let Some((name_token, arg_tokens)) = tokens.split_first() else {
            return Ok(None);
        };

        let command = self.find(&name_token.value())?;
        let argv: Vec<String> = arg_tokens.iter().map(|t| t.value()).collect();

        session.shared().record_command();
        command.action.run(session, self, &argv)
    }

    /// The shell-wide completer: every command's engine, aggregated.
    pub fn shell_completer(&self) -> AggregateCompleter {
        let engines: Vec<Arc<dyn Completer>> = self
            .commands
            .iter()
            .map(|c| Arc::clone(&c.completer) as Arc<dyn Completer>)
            .collect();
        AggregateCompleter::new(engines)
    }

    /// Apply a strict-completion setting to every command engine.
    pub fn set_strict(&self, strict: bool) {
        for command in &self.commands {
            command.completer.set_strict(strict);
        }
    }

    /// Whether strict completion is in effect (true when every engine is
    /// strict; an empty registry counts as strict).
    pub fn strict(&self) -> bool {
        self.commands.iter().all(|c| c.completer.strict())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::OptionSpec;
    use crate::config::Config;
    use crate::error::CoshError;
    use crate::repl::SharedState;

    struct RecordingAction;

    impl Action for RecordingAction {
        fn run(
            &self,
            _session: &Session,
            _registry: &CommandRegistry,
            argv: &[String],
        ) -> Result<Option<String>> {
            Ok(Some(argv.join("|")))
        }
    }

    fn test_registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        registry.register(
            CommandSpec::new("bundle", "list", "List bundles")
                .option(OptionSpec::flag("--verbose", "Verbose output")),
            Box::new(RecordingAction),
            Vec::new(),
        );
        registry.register(
            CommandSpec::new("service", "list", "List services"),
            Box::new(RecordingAction),
            Vec::new(),
        );
        registry.register(
            CommandSpec::new("log", "set", "Set the log level"),
            Box::new(RecordingAction),
            Vec::new(),
        );
        registry
    }

    fn test_session() -> Session {
        Session::new(SharedState::default(), Config::default())
    }

    #[test]
    fn test_find_by_full_name() {
        let registry = test_registry();
        assert_eq!(
            registry.find("bundle:list").unwrap().spec().summary,
            "List bundles"
        );
    }

    #[test]
    fn test_find_by_unique_short_name() {
        let registry = test_registry();
        assert_eq!(registry.find("set").unwrap().spec().full_name(), "log:set");
    }

    #[test]
    fn test_ambiguous_short_name() {
        let registry = test_registry();
        let err = registry.find("list").unwrap_err();
        assert!(matches!(
            err,
            CoshError::Command(CommandError::Ambiguous { .. })
        ));
    }

    #[test]
    fn test_unknown_command() {
        let registry = test_registry();
        assert!(matches!(
            registry.find("nope").unwrap_err(),
            CoshError::Command(CommandError::NotFound(_))
        ));
    }

    #[test]
    fn test_execute_passes_resolved_argv() {
        let registry = test_registry();
        let session = test_session();
        let output = registry
            .execute(&session, r#"log:set "a b" c"#)
            .unwrap()
            .unwrap();
        assert_eq!(output, "a b|c");
        assert_eq!(session.shared().commands_run(), 1);
    }

    #[test]
    fn test_execute_blank_line_is_silent() {
        let registry = test_registry();
        let session = test_session();
        assert!(registry.execute(&session, "   ").unwrap().is_none());
        assert_eq!(session.shared().commands_run(), 0);
    }

    #[test]
    fn test_strict_fan_out() {
        let registry = test_registry();
        assert!(registry.strict());
        registry.set_strict(false);
        assert!(!registry.strict());
    }

    #[test]
    fn test_shell_completer_spans_commands() {
        let registry = test_registry();
        let completer = registry.shell_completer();

        let mut candidates = Vec::new();
        let pos = completer.complete("bundle:l", 8, &mut candidates);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["bundle:list"]);

        // Bare verbs from several scopes surface together.
        candidates.clear();
        let pos = completer.complete("li", 2, &mut candidates);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["list"]);
    }
}
