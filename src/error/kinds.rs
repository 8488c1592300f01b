use std::{fmt, io};

/// Crate-wide `Result` type using [`CoshError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, CoshError>;

/// Top-level error type for cosh operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum CoshError {
    /// Command line parsing errors.
    Parse(ParseError),

    /// Command lookup and execution errors.
    Command(CommandError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),

    /// Generic error with a free-form message.
    Generic(String),
}

/// Parsing-specific errors.
#[derive(Debug)]
pub enum ParseError {
    /// A quoted section was opened but never closed.
    UnterminatedQuote(char),

    /// The buffer ended in the middle of an escape sequence.
    DanglingEscape,

    /// Syntax error in an input line.
    SyntaxError(String),
}

/// Command-specific errors.
#[derive(Debug)]
pub enum CommandError {
    /// No command registered under the given name.
    NotFound(String),

    /// A short name matched more than one registered command.
    Ambiguous { name: String, matches: Vec<String> },

    /// The command was invoked with arguments it cannot accept.
    InvalidArguments { command: String, reason: String },

    /// Command execution failed.
    ExecutionFailed(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for CoshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoshError::Parse(e) => write!(f, "{e}"),
            CoshError::Command(e) => write!(f, "{e}"),
            CoshError::Config(e) => write!(f, "Configuration error: {e}"),
            CoshError::Io(e) => write!(f, "I/O error: {e}"),
            CoshError::Generic(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnterminatedQuote(q) => write!(f, "Unterminated {q} quote"),
            ParseError::DanglingEscape => write!(f, "Line ends in an unfinished escape"),
            ParseError::SyntaxError(msg) => write!(f, "Syntax error: {msg}"),
        }
    }
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::NotFound(name) => write!(f, "Command not found: {name}"),
            CommandError::Ambiguous { name, matches } => {
                write!(f, "Ambiguous command '{name}': {}", matches.join(", "))
            }
            CommandError::InvalidArguments { command, reason } => {
                write!(f, "Invalid arguments for {command}: {reason}")
            }
            CommandError::ExecutionFailed(msg) => write!(f, "Command failed: {msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value for '{field}': {value}")
            }
        }
    }
}

impl std::error::Error for CoshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoshError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl std::error::Error for ParseError {}
impl std::error::Error for CommandError {}
impl std::error::Error for ConfigError {}

/* ============================= Conversions ============================== */

impl From<io::Error> for CoshError {
    fn from(err: io::Error) -> Self {
        CoshError::Io(err)
    }
}

impl From<ParseError> for CoshError {
    fn from(err: ParseError) -> Self {
        CoshError::Parse(err)
    }
}

impl From<CommandError> for CoshError {
    fn from(err: CommandError) -> Self {
        CoshError::Command(err)
    }
}

impl From<ConfigError> for CoshError {
    fn from(err: ConfigError) -> Self {
        CoshError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = CoshError::Parse(ParseError::UnterminatedQuote('"'));
        assert_eq!(err.to_string(), "Unterminated \" quote");
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::NotFound("log:set".to_string());
        assert_eq!(err.to_string(), "Command not found: log:set");

        let err = CommandError::Ambiguous {
            name: "list".to_string(),
            matches: vec!["bundle:list".to_string(), "service:list".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Ambiguous command 'list': bundle:list, service:list"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = CoshError::Config(ConfigError::InvalidValue {
            field: "history.max_size".to_string(),
            value: "0".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid value for 'history.max_size': 0"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err: CoshError = io_err.into();
        assert!(matches!(err, CoshError::Io(_)));
        assert!(err.to_string().starts_with("I/O error:"));
    }
}
