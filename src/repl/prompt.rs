//! Custom prompt implementation for cosh

use reedline::{Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus};

/// Custom prompt for the cosh REPL
pub struct ConsolePrompt {
    /// Shell name shown before the prompt marker
    name: String,
}

impl ConsolePrompt {
    /// Create a new console prompt
    ///
    /// # Arguments
    /// * `name` - Shell name to display
    ///
    /// # Returns
    /// * `Self` - New prompt
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for ConsolePrompt {
    fn default() -> Self {
        Self::new("cosh")
    }
}

impl Prompt for ConsolePrompt {
    /// Render the left prompt (main prompt)
    fn render_prompt_left(&self) -> std::borrow::Cow<'_, str> {
        format!("{}> ", self.name).into()
    }

    /// Render the right prompt (empty in our case)
    fn render_prompt_right(&self) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the prompt indicator (empty since we include it in the left
    /// prompt)
    fn render_prompt_indicator(&self, _prompt_mode: PromptEditMode) -> std::borrow::Cow<'_, str> {
        "".into()
    }

    /// Render the multiline prompt indicator
    fn render_prompt_multiline_indicator(&self) -> std::borrow::Cow<'_, str> {
        "... ".into()
    }

    /// Render the history search prompt
    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> std::borrow::Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        format!("({}reverse-search: {}) ", prefix, history_search.term).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_prompt() {
        let prompt = ConsolePrompt::default();
        assert_eq!(prompt.render_prompt_left(), "cosh> ");
    }

    #[test]
    fn test_named_prompt() {
        let prompt = ConsolePrompt::new("ops");
        assert_eq!(prompt.render_prompt_left(), "ops> ");
    }

    #[test]
    fn test_right_prompt_empty() {
        let prompt = ConsolePrompt::default();
        assert_eq!(prompt.render_prompt_right(), "");
    }

    #[test]
    fn test_multiline_indicator() {
        let prompt = ConsolePrompt::default();
        assert_eq!(prompt.render_prompt_multiline_indicator(), "... ");
    }
}
