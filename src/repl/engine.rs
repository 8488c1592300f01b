//! REPL engine for interactive command input
//!
//! Owns the reedline editor and its helper set: completion menu on TAB,
//! file-backed history, history hints, quote-aware line continuation, and
//! syntax highlighting. Reading lines is all this type does; dispatching
//! them belongs to the command registry.

use std::sync::Arc;

use reedline::{
    ColumnarMenu, Emacs, FileBackedHistory, KeyCode, KeyModifiers, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};

use crate::command::CommandRegistry;
use crate::config::Config;
use crate::error::{CoshError, Result};

use super::completer::ConsoleCompleter;
use super::highlighter::ConsoleHighlighter;
use super::hinter::ConsoleHinter;
use super::prompt::ConsolePrompt;
use super::validator::ConsoleValidator;

/// Name of the completion menu bound to TAB.
const COMPLETION_MENU: &str = "completion_menu";

/// Interactive line reader for the shell.
pub struct ReplEngine {
    /// Line editor
    editor: Reedline,

    /// Prompt renderer
    prompt: ConsolePrompt,
}

impl ReplEngine {
    /// Create a new REPL engine.
    ///
    /// # Arguments
    /// * `config` - Effective configuration
    /// * `registry` - Command registry supplying completion and known names
    ///
    /// # Returns
    /// * `Result<Self>` - New REPL engine or error
    pub fn new(config: &Config, registry: &CommandRegistry) -> Result<Self> {
        let completer = ConsoleCompleter::new(Arc::new(registry.shell_completer()));

        let mut keybindings = default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu(COMPLETION_MENU.to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let menu = ColumnarMenu::default().with_name(COMPLETION_MENU);
        let mut editor = Reedline::create()
            .with_completer(Box::new(completer))
            .with_menu(ReedlineMenu::EngineCompleter(Box::new(menu)))
            .with_edit_mode(Box::new(Emacs::new(keybindings)))
            .with_validator(Box::new(ConsoleValidator::new()))
            .with_ansi_colors(config.display.color_output);

        if config.display.hints {
            editor = editor.with_hinter(Box::new(ConsoleHinter::new()));
        }

        if config.display.syntax_highlighting {
            editor = editor.with_highlighter(Box::new(ConsoleHighlighter::new(
                registry.names(),
                config.display.color_output,
            )));
        }

        if config.history.persist {
            let history = FileBackedHistory::with_file(
                config.history.max_size,
                config.history.file_path.clone(),
            )
            .map_err(|e| CoshError::Generic(format!("Failed to open history file: {e}")))?;
            editor = editor.with_history(Box::new(history));
        }

        Ok(Self {
            editor,
            prompt: ConsolePrompt::default(),
        })
    }

    /// Read a single line of input.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - Input line, or `None` on EOF / interrupt
    pub fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.read_line(&self.prompt) {
            Ok(Signal::Success(line)) => Ok(Some(line)),
            Ok(Signal::CtrlC) | Ok(Signal::CtrlD) => Ok(None),
            Err(err) => Err(CoshError::Generic(format!("Read error: {err}"))),
        }
    }
}
