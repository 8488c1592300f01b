//! Declarative command descriptors
//!
//! A command is described by data, not discovered by inspecting its
//! implementation: the [`CommandSpec`] enumerates the option descriptors and
//! positional argument names up front, and both the help renderer and the
//! completion engine work from that table alone.

/// Descriptor for a single command option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical option name, including its leading dashes (e.g. `--upper`).
    pub name: String,

    /// Alternate spellings that resolve to the same option (e.g. `-u`).
    pub aliases: Vec<String>,

    /// Whether the option consumes the following token as its value.
    /// Options without a value are booleans.
    pub takes_value: bool,

    /// One-line description shown by `shell:help`.
    pub description: String,
}

impl OptionSpec {
    /// Create a boolean option (no value token).
    ///
    /// # Arguments
    /// * `name` - Canonical name, e.g. `--upper`
    /// * `description` - Help text
    pub fn flag(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
            takes_value: false,
            description: description.into(),
        }
    }

    /// Create an option that consumes the following token as its value.
    ///
    /// # Arguments
    /// * `name` - Canonical name, e.g. `--directory`
    /// * `description` - Help text
    pub fn valued(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            takes_value: true,
            ..Self::flag(name, description)
        }
    }

    /// Add an alias spelling.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
}

/// Descriptor for a registered command.
///
/// Commands are named `scope:name`; the bare `name` also resolves to the
/// command as long as it is unambiguous across scopes.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Namespace of the command (e.g. `shell`, `log`).
    pub scope: String,

    /// Command verb within the scope.
    pub name: String,

    /// One-line summary shown by `shell:help`.
    pub summary: String,

    /// Declared options, in help-display order.
    pub options: Vec<OptionSpec>,

    /// Positional argument placeholders for help output
    /// (e.g. `<level>`, `[text...]`).
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command descriptor.
    ///
    /// # Arguments
    /// * `scope` - Command namespace
    /// * `name` - Command verb
    /// * `summary` - One-line summary
    pub fn new(
        scope: impl Into<String>,
        name: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            scope: scope.into(),
            name: name.into(),
            summary: summary.into(),
            options: Vec::new(),
            args: Vec::new(),
        }
    }

    /// Declare an option.
    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Declare a positional argument placeholder for help output.
    pub fn arg(mut self, placeholder: impl Into<String>) -> Self {
        self.args.push(placeholder.into());
        self
    }

    /// The fully qualified `scope:name` form.
    pub fn full_name(&self) -> String {
        if self.scope.is_empty() {
            self.name.clone()
        } else {
            format!("{}:{}", self.scope, self.name)
        }
    }

    /// The bare verb, recognized when unambiguous.
    pub fn short_name(&self) -> &str {
        &self.name
    }

    /// Every name this command answers to.
    ///
    /// A command without a scope has no distinct short form.
    pub fn names(&self) -> Vec<String> {
        let full = self.full_name();
        if full == self.name {
            vec![full]
        } else {
            vec![full, self.name.clone()]
        }
    }

    /// Usage line for help output.
    pub fn usage(&self) -> String {
        let mut usage = self.full_name();
        if !self.options.is_empty() {
            usage.push_str(" [options]");
        }
        for arg in &self.args {
            usage.push(' ');
            usage.push_str(arg);
        }
        usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_flag() {
        let opt = OptionSpec::flag("--upper", "Uppercase the output").with_alias("-u");
        assert_eq!(opt.name, "--upper");
        assert_eq!(opt.aliases, vec!["-u"]);
        assert!(!opt.takes_value);
    }

    #[test]
    fn test_option_valued() {
        let opt = OptionSpec::valued("--directory", "Target directory").with_alias("-d");
        assert!(opt.takes_value);
        assert_eq!(opt.description, "Target directory");
    }

    #[test]
    fn test_full_and_short_names() {
        let spec = CommandSpec::new("log", "set", "Set the log level");
        assert_eq!(spec.full_name(), "log:set");
        assert_eq!(spec.short_name(), "set");
        assert_eq!(spec.names(), vec!["log:set".to_string(), "set".to_string()]);
    }

    #[test]
    fn test_unscoped_command_has_single_name() {
        let spec = CommandSpec::new("", "exit", "Leave the shell");
        assert_eq!(spec.full_name(), "exit");
        assert_eq!(spec.names(), vec!["exit".to_string()]);
    }

    #[test]
    fn test_usage_line() {
        let spec = CommandSpec::new("log", "set", "Set the log level")
            .option(OptionSpec::flag("--quiet", "No confirmation output"))
            .arg("<level>");
        assert_eq!(spec.usage(), "log:set [options] <level>");
    }
}
