//! Completer for reedline - provides completion suggestions

use std::sync::Arc;

use reedline::{Completer, Span, Suggestion};

use super::completion;

/// Console completer for reedline
///
/// Thin adapter between reedline's suggestion model and the shell's
/// completion engines: the wrapped completer returns an absolute insertion
/// offset (or nothing), which becomes the suggestion span.
pub struct ConsoleCompleter {
    /// Shell-wide completion engine
    engine: Arc<dyn completion::Completer>,
}

impl ConsoleCompleter {
    /// Create a new console completer
    ///
    /// # Arguments
    /// * `engine` - The completer to consult, usually the registry's
    ///   aggregate over every command engine
    ///
    /// # Returns
    /// * `Self` - New completer
    pub fn new(engine: Arc<dyn completion::Completer>) -> Self {
        Self { engine }
    }
}

impl Completer for ConsoleCompleter {
    /// Complete the input at the given cursor position
    ///
    /// # Arguments
    /// * `line` - The input line
    /// * `pos` - Cursor position (byte index)
    ///
    /// # Returns
    /// * `Vec<Suggestion>` - List of completion suggestions
    fn complete(&mut self, line: &str, pos: usize) -> Vec<Suggestion> {
        let mut candidates = Vec::new();
        let Some(start) = self.engine.complete(line, pos, &mut candidates) else {
            return Vec::new();
        };

        candidates
            .into_iter()
            .map(|value| Suggestion {
                value,
                description: None,
                style: None,
                extra: None,
                span: Span::new(start, pos),
                append_whitespace: false,
                match_indices: None,
            })
            .collect()
    }
}
