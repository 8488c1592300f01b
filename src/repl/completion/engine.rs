//! Argument completion engine
//!
//! The engine owns the grammar walk for a single command: command name
//! first, then option tokens (some of which consume a value token), then
//! positional arguments. Given a buffer and a cursor it decides which slot
//! the cursor occupies, validates everything to the left of it, dispatches
//! the matching completer and translates the result back into absolute
//! buffer coordinates.
//!
//! There is exactly one failure channel: `None`, meaning "do not complete
//! here". Unknown options, mistyped command names, failed positional
//! validation and completers that decline all collapse into it; the only
//! thing an interactive caller does with a failure is show nothing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;

use crate::command::CommandSpec;

use super::argument_list::{ArgumentList, LineTokenizer, ShellTokenizer};
use super::completer::{Completer, NullCompleter, StringsCompleter};
use super::delimiter::{is_delimiter, trim_trailing_delimiters};
use super::options::OptionTable;

/// Marker that makes a token look like an option.
const OPTION_PREFIX: char = '-';

/// Grammar-walking completer for one command.
pub struct ArgumentCompleter {
    /// Completes (and validates) the command-name slot.
    command_completer: StringsCompleter,

    /// Completes (and validates) option-name tokens.
    options_completer: StringsCompleter,

    /// Option descriptor lookup, including aliases and `--help`.
    options: OptionTable,

    /// Positional completers; the last entry repeats for any further slots.
    /// Never empty: an undeclared positional sequence holds one
    /// pass-through completer.
    args_completers: Vec<Arc<dyn Completer>>,

    /// Placeholder dispatched for an option's value slot.
    value_completer: NullCompleter,

    /// Tokenizer collaborator.
    tokenizer: Box<dyn LineTokenizer>,

    /// When set, completion at a slot requires every earlier token to
    /// validate. Togglable between calls.
    strict: AtomicBool,
}

impl ArgumentCompleter {
    /// Create an engine for a command.
    ///
    /// The command-name completer recognizes both `scope:name` and the bare
    /// `name`; the option table is built from the command's declared
    /// options.
    ///
    /// # Arguments
    /// * `spec` - The command descriptor
    /// * `args_completers` - Completers for the positional slots, in order.
    ///   May be empty, in which case every positional slot is free-form.
    pub fn new(spec: &CommandSpec, args_completers: Vec<Arc<dyn Completer>>) -> Self {
        let options = OptionTable::from_specs(&spec.options);
        let options_completer = StringsCompleter::new(options.keys());

        let mut args_completers = args_completers;
        if args_completers.is_empty() {
            args_completers.push(Arc::new(NullCompleter));
        }

        Self {
            command_completer: StringsCompleter::new(spec.names()),
            options_completer,
            options,
            args_completers,
            value_completer: NullCompleter,
            tokenizer: Box::new(ShellTokenizer),
            strict: AtomicBool::new(true),
        }
    }

    /// Replace the tokenizer collaborator.
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn LineTokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// If true, a completion at argument N only succeeds when the
    /// completions for arguments 0..N also succeed.
    pub fn set_strict(&self, strict: bool) {
        self.strict.store(strict, Ordering::Relaxed);
    }

    /// Whether strict left-to-right validation is in effect.
    pub fn strict(&self) -> bool {
        self.strict.load(Ordering::Relaxed)
    }

    /// Complete the buffer at the given cursor position.
    ///
    /// # Arguments
    /// * `buffer` - The command line
    /// * `cursor` - Cursor byte offset into the buffer
    /// * `candidates` - Output collection candidates are appended to
    ///
    /// # Returns
    /// * `Option<usize>` - Absolute buffer offset where candidates should be
    ///   inserted, or `None` when nothing completes here
    pub fn complete(
        &self,
        buffer: &str,
        cursor: usize,
        candidates: &mut Vec<String>,
    ) -> Option<usize> {
        let cursor = cursor.min(buffer.len());
        let list = match self.tokenizer.delimit(buffer, cursor) {
            Ok(list) => list,
            Err(err) => {
                trace!(%err, "tokenizer failed, falling back to whole-buffer token");
                ArgumentList::whole_buffer(buffer, cursor)
            }
        };

        let comp = self.select_completer(&list)?;
        let ret = comp.complete(list.cursor_argument(), list.offset_in_token(), candidates)?;

        // Sub-completer offsets are relative to the cursor token; shift by
        // the token's start offset in the buffer.
        let pos = ret + (list.buffer_offset() - list.offset_in_token());

        // When completing in the middle of a line with the cursor resting on
        // a separator, the separator already in the buffer makes any
        // trailing separator on a candidate redundant: completing "f" in
        // "f bar" should produce "foo bar", not "foo  bar".
        if cursor != buffer.len() && is_delimiter(buffer, cursor) {
            for candidate in candidates.iter_mut() {
                let trimmed = trim_trailing_delimiters(candidate);
                if trimmed.len() != candidate.len() {
                    *candidate = trimmed.to_string();
                }
            }
        }

        Some(pos)
    }

    /// Walk the grammar up to the cursor token and pick the completer for
    /// the slot the cursor occupies.
    fn select_completer(&self, list: &ArgumentList) -> Option<&dyn Completer> {
        let args = list.arguments();
        let arg_index = list.cursor_index();
        let mut index = 0;

        // Command-name slot. A command name that does not validate disables
        // completion for the whole line, independent of the strict flag.
        if index < arg_index {
            if !verify_exact(&self.command_completer, &args[index]) {
                trace!(token = %args[index], "command name failed validation");
                return None;
            }
            index += 1;
        } else {
            return Some(&self.command_completer);
        }

        // Option slots.
        while index < arg_index && is_option_token(&args[index]) {
            let strict = self.strict();
            if strict && !verify(&self.options_completer, &args[index]) {
                return None;
            }
            match self.options.lookup(&args[index]) {
                Some(option) if option.takes_value => {
                    // The option consumes the next token as its value. If
                    // that token is the cursor token, the cursor is
                    // completing the value: a free-form slot. The cursor
                    // token itself is never stepped over.
                    index += 1;
                    if index == arg_index {
                        return Some(&self.value_completer);
                    }
                }
                Some(_) => {}
                None if strict => {
                    trace!(token = %args[index], "unknown option");
                    return None;
                }
                // Relaxed mode: treat an unknown option as a boolean and
                // keep walking.
                None => {}
            }
            index += 1;
        }
        if index >= arg_index && index < args.len() && is_option_token(&args[index]) {
            return Some(&self.options_completer);
        }

        // Positional slots.
        let mut positional = 0;
        while index < arg_index {
            let sub = self.positional_completer(positional);
            if self.strict() && !verify(sub, &args[index]) {
                trace!(token = %args[index], positional, "positional failed validation");
                return None;
            }
            index += 1;
            positional += 1;
        }
        Some(self.positional_completer(positional))
    }

    /// The completer for positional slot `index`; past the end of the
    /// declared sequence the last completer repeats indefinitely.
    fn positional_completer(&self, index: usize) -> &dyn Completer {
        let clamped = index.min(self.args_completers.len() - 1);
        self.args_completers[clamped].as_ref()
    }
}

/// The engine is itself a completer, so one engine per command can nest
/// inside a shell-wide aggregate, or inside another engine's positional
/// slot (sub-command completion).
impl Completer for ArgumentCompleter {
    fn complete(&self, partial: &str, offset: usize, candidates: &mut Vec<String>) -> Option<usize> {
        ArgumentCompleter::complete(self, partial, offset, candidates)
    }
}

/// Token shape check for the option slots.
fn is_option_token(token: &str) -> bool {
    token.starts_with(OPTION_PREFIX)
}

/// A token validates when the completer, fed the whole token, still has at
/// least one candidate for it.
///
/// A completer with no candidate universe at all (it declines even the
/// empty prefix) marks a free-form slot and accepts any token, so a
/// pass-through placeholder earlier in the grammar never blocks completion
/// further right.
fn verify(completer: &dyn Completer, token: &str) -> bool {
    let mut candidates = Vec::new();
    if completer
        .complete(token, token.len(), &mut candidates)
        .is_some()
        && !candidates.is_empty()
    {
        return true;
    }

    candidates.clear();
    completer.complete("", 0, &mut candidates).is_none() && candidates.is_empty()
}

/// Full-token validation that additionally requires exact membership:
/// prefixes of a valid name are not accepted.
fn verify_exact(completer: &dyn Completer, token: &str) -> bool {
    let mut candidates = Vec::new();
    if completer
        .complete(token, token.len(), &mut candidates)
        .is_none()
    {
        return false;
    }
    candidates.iter().any(|c| c.trim_end() == token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::OptionSpec;
    use crate::error::ParseError;

    /// `feature:install [--verbose] [--name <name>] <feature>` against a
    /// fixed feature universe.
    fn test_engine() -> ArgumentCompleter {
        let spec = CommandSpec::new("feature", "install", "Install a feature")
            .option(OptionSpec::flag("--verbose", "Verbose output").with_alias("-v"))
            .option(OptionSpec::valued("--name", "Instance name").with_alias("-n"))
            .arg("<feature>");
        ArgumentCompleter::new(&spec, vec![Arc::new(StringsCompleter::new(["a", "ab", "b"]))])
    }

    fn complete(engine: &ArgumentCompleter, buffer: &str, cursor: usize) -> (Option<usize>, Vec<String>) {
        let mut candidates = Vec::new();
        let pos = engine.complete(buffer, cursor, &mut candidates);
        (pos, candidates)
    }

    #[test]
    fn test_command_name_completion() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feat", 4);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["feature:install"]);
    }

    #[test]
    fn test_short_name_is_recognized() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "ins", 3);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["install"]);

        let (pos, candidates) = complete(&engine, "", 0);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["feature:install", "install"]);
    }

    #[test]
    fn test_invalid_command_name_blocks_whole_line() {
        let engine = test_engine();
        // "feat" is a prefix of the command name, but prefixes are not
        // membership: anything past the command token is dead.
        let (pos, candidates) = complete(&engine, "feat a", 6);
        assert_eq!(pos, None);
        assert!(candidates.is_empty());

        let (pos, _) = complete(&engine, "bogus --verbose ", 16);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_invalid_command_name_ignores_strict_flag() {
        let engine = test_engine();
        engine.set_strict(false);
        let (pos, _) = complete(&engine, "bogus a", 7);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_option_name_completion() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install -", 17);
        assert_eq!(pos, Some(16));
        assert_eq!(candidates, vec!["--help", "--name", "--verbose", "-n", "-v"]);

        let (pos, candidates) = complete(&engine, "feature:install --v", 19);
        assert_eq!(pos, Some(16));
        assert_eq!(candidates, vec!["--verbose"]);
    }

    #[test]
    fn test_option_value_slot_is_free_form() {
        let engine = test_engine();
        // Cursor right after a value-taking option: the value slot offers
        // nothing, and in particular must not leak positional candidates.
        let (pos, candidates) = complete(&engine, "feature:install --name ", 23);
        assert_eq!(pos, None);
        assert!(candidates.is_empty());

        // Same while typing the value itself.
        let (pos, _) = complete(&engine, "feature:install --name a", 24);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_positional_resumes_after_option_value() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install --name x ", 25);
        assert_eq!(pos, Some(25));
        assert_eq!(candidates, vec!["a", "ab", "b"]);
    }

    #[test]
    fn test_boolean_option_does_not_consume_value() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install --verbose a", 27);
        assert_eq!(pos, Some(26));
        assert_eq!(candidates, vec!["a", "ab"]);
    }

    #[test]
    fn test_positional_completion() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install a", 17);
        assert_eq!(pos, Some(16));
        assert_eq!(candidates, vec!["a", "ab"]);
    }

    #[test]
    fn test_last_positional_completer_repeats() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install a b a", 21);
        assert_eq!(pos, Some(20));
        assert_eq!(candidates, vec!["a", "ab"]);
    }

    #[test]
    fn test_strict_rejects_invalid_positional() {
        let engine = test_engine();
        let (pos, _) = complete(&engine, "feature:install zzz ", 20);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_strict_rejects_unknown_option() {
        let engine = test_engine();
        let (pos, _) = complete(&engine, "feature:install --bogus a", 25);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_relaxed_mode_skips_earlier_validation() {
        let engine = test_engine();
        engine.set_strict(false);
        assert!(!engine.strict());

        // Same buffers that fail under strict validation now complete at
        // the cursor's own slot.
        let (pos, candidates) = complete(&engine, "feature:install --bogus a", 25);
        assert_eq!(pos, Some(24));
        assert_eq!(candidates, vec!["a", "ab"]);

        let (pos, candidates) = complete(&engine, "feature:install zzz a", 21);
        assert_eq!(pos, Some(20));
        assert_eq!(candidates, vec!["a", "ab"]);
    }

    #[test]
    fn test_duplicate_options_are_permitted() {
        let engine = test_engine();
        let (pos, candidates) = complete(&engine, "feature:install -v -v a", 23);
        assert_eq!(pos, Some(22));
        assert_eq!(candidates, vec!["a", "ab"]);
    }

    #[test]
    fn test_option_alias_consumes_value() {
        let engine = test_engine();
        let (pos, _) = complete(&engine, "feature:install -n ", 19);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_empty_positional_sequence_is_free_form() {
        let spec = CommandSpec::new("shell", "echo", "Echo arguments");
        let engine = ArgumentCompleter::new(&spec, Vec::new());
        let (pos, candidates) = complete(&engine, "shell:echo anything ", 20);
        assert_eq!(pos, None);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_free_form_slot_does_not_block_later_validation() {
        let spec = CommandSpec::new("dev", "dump-create", "Create a diagnostic dump");
        let completers: Vec<Arc<dyn Completer>> = vec![
            Arc::new(NullCompleter),
            Arc::new(StringsCompleter::new(["full", "minimal"])),
        ];
        let engine = ArgumentCompleter::new(&spec, completers);

        let (pos, candidates) = complete(&engine, "dev:dump-create anything ", 25);
        assert_eq!(pos, Some(25));
        assert_eq!(candidates, vec!["full", "minimal"]);
    }

    #[test]
    fn test_delimiter_trimming_mid_buffer() {
        let spec = CommandSpec::new("", "cmd", "A command");
        // A completer whose stored candidate carries a trailing separator.
        let engine =
            ArgumentCompleter::new(&spec, vec![Arc::new(StringsCompleter::new(["foo "]))]);

        // Cursor rests on the separator after "f": trailing separator on
        // the candidate is redundant and gets stripped.
        let buffer = "cmd f bar";
        let (pos, candidates) = complete(&engine, buffer, 5);
        assert_eq!(pos, Some(4));
        assert_eq!(candidates, vec!["foo"]);

        // At end of buffer the same candidate keeps its separator.
        let (pos, candidates) = complete(&engine, "cmd f", 5);
        assert_eq!(pos, Some(4));
        assert_eq!(candidates, vec!["foo "]);
    }

    #[test]
    fn test_idempotent_for_same_input() {
        let engine = test_engine();
        let first = complete(&engine, "feature:install a", 17);
        let second = complete(&engine, "feature:install a", 17);
        assert_eq!(first, second);
    }

    #[test]
    fn test_tokenizer_failure_degrades_to_whole_buffer() {
        struct FailingTokenizer;
        impl LineTokenizer for FailingTokenizer {
            fn delimit(&self, _buffer: &str, _cursor: usize) -> Result<ArgumentList, ParseError> {
                Err(ParseError::SyntaxError("forced".to_string()))
            }
        }

        let spec = CommandSpec::new("feature", "install", "Install a feature");
        let engine = ArgumentCompleter::new(&spec, Vec::new())
            .with_tokenizer(Box::new(FailingTokenizer));

        // The whole buffer becomes the command-name token.
        let (pos, candidates) = complete(&engine, "feat", 4);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["feature:install"]);

        let (pos, _) = complete(&engine, "feature:install a", 17);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_unterminated_quote_uses_fallback() {
        let engine = test_engine();
        // The lexer refuses the buffer; the fallback treats it as one
        // token, which no longer matches the command name.
        let (pos, _) = complete(&engine, "feature:install \"a", 18);
        assert_eq!(pos, None);
    }

    #[test]
    fn test_engine_nests_as_sub_completer() {
        let sub_spec = CommandSpec::new("log", "set", "Set the log level");
        let sub = ArgumentCompleter::new(
            &sub_spec,
            vec![Arc::new(StringsCompleter::new(["debug", "info"]))],
        );

        // The nested engine sees the token as its own buffer.
        let mut candidates = Vec::new();
        let pos = Completer::complete(&sub, "log", 3, &mut candidates);
        assert_eq!(pos, Some(0));
        assert_eq!(candidates, vec!["log:set"]);
    }

    #[test]
    fn test_cursor_on_value_token_is_never_stepped_over() {
        let engine = test_engine();
        // Option value boundary: "--name" consumes "a"; with the cursor
        // inside "a" the dispatched slot must be the value slot, not the
        // positional after it.
        let (pos, candidates) = complete(&engine, "feature:install --name a b", 24);
        assert_eq!(pos, None);
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_cursor_on_option_token_completes_options() {
        let engine = test_engine();
        // Cursor inside the option token itself, with more tokens after it.
        let (pos, candidates) = complete(&engine, "feature:install --na a", 20);
        assert_eq!(pos, Some(16));
        assert_eq!(candidates, vec!["--name"]);
    }
}
