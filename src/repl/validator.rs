//! Validator for reedline - validates line completeness

use reedline::{ValidationResult, Validator};

use crate::parser::LineLexer;

/// Console validator for reedline
///
/// A line is incomplete while a quote is still open or the line ends in an
/// unfinished escape; reedline then prompts for a continuation line instead
/// of submitting.
pub struct ConsoleValidator;

impl ConsoleValidator {
    /// Create a new console validator
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator for ConsoleValidator {
    /// Validate input for completeness
    ///
    /// # Arguments
    /// * `line` - The input line to validate
    ///
    /// # Returns
    /// * `ValidationResult` - Whether the input is complete or incomplete
    fn validate(&self, line: &str) -> ValidationResult {
        match LineLexer::tokenize(line) {
            Ok(_) => ValidationResult::Complete,
            Err(_) => ValidationResult::Incomplete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_complete(line: &str) -> bool {
        matches!(
            ConsoleValidator::new().validate(line),
            ValidationResult::Complete
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(is_complete(""));
        assert!(is_complete("   "));
    }

    #[test]
    fn test_simple_command() {
        assert!(is_complete("log:set debug"));
        assert!(is_complete("shell:echo hello"));
    }

    #[test]
    fn test_balanced_quotes() {
        assert!(is_complete(r#"shell:echo "hello world""#));
        assert!(is_complete("shell:echo 'a b'"));
    }

    #[test]
    fn test_open_quote_is_incomplete() {
        assert!(!is_complete(r#"shell:echo "hello"#));
        assert!(!is_complete("shell:echo 'hello"));
    }

    #[test]
    fn test_trailing_escape_is_incomplete() {
        assert!(!is_complete("shell:echo foo\\"));
    }

    #[test]
    fn test_escaped_quote_is_complete() {
        assert!(is_complete(r#"shell:echo \""#));
    }
}
