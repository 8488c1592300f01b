//! Syntax highlighter for the console shell
//!
//! Colors the pieces of a command line as it is typed: a recognized command
//! name, option tokens, and quoted strings. Everything else stays plain.

use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

/// Console highlighter for reedline
pub struct ConsoleHighlighter {
    /// Every name a registered command answers to
    commands: Vec<String>,
    /// Whether to emit any styling at all
    enabled: bool,
}

impl ConsoleHighlighter {
    /// Create a new highlighter
    ///
    /// # Arguments
    /// * `commands` - Known command names (full and bare forms)
    /// * `enabled` - Disable to pass text through unstyled
    pub fn new(commands: Vec<String>, enabled: bool) -> Self {
        Self { commands, enabled }
    }

    /// Style for a word, given whether it is the first word on the line
    fn word_style(&self, word: &str, is_first: bool) -> Style {
        if is_first {
            if self.commands.iter().any(|c| c == word) {
                return Style::new().fg(Color::LightGreen).bold();
            }
            return Style::default();
        }
        if word.starts_with('-') {
            return Style::new().fg(Color::Cyan);
        }
        if word.starts_with('"') || word.starts_with('\'') {
            return Style::new().fg(Color::Yellow);
        }
        Style::default()
    }
}

impl Highlighter for ConsoleHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        if !self.enabled {
            styled.push((Style::default(), line.to_string()));
            return styled;
        }

        let mut first_word = true;
        let mut rest = line;
        while !rest.is_empty() {
            let is_space = rest.chars().next().is_some_and(char::is_whitespace);
            let end = rest
                .char_indices()
                .find(|(_, c)| c.is_whitespace() != is_space)
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (segment, tail) = rest.split_at(end);

            if is_space {
                styled.push((Style::default(), segment.to_string()));
            } else {
                styled.push((self.word_style(segment, first_word), segment.to_string()));
                first_word = false;
            }
            rest = tail;
        }

        styled
    }
}
