//! Command-line interface for cosh
//!
//! This module handles:
//! - Command-line argument parsing using clap
//! - Configuration loading and validation
//! - Mode selection (interactive vs one-shot execution)
//! - The `version`, `completion` and `config` subcommands

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

use crate::config::{Config, LogLevel};
use crate::error::Result;

/// cosh - An interactive scoped-command console shell
#[derive(Parser, Debug)]
#[command(
    name = "cosh",
    version,
    about = "An interactive scoped-command console shell",
    long_about = "An interactive console shell with scoped commands (scope:name), \
declarative option tables and grammar-aware TAB completion."
)]
pub struct CliArgs {
    /// Command line to execute non-interactively
    ///
    /// Example: cosh "log:set debug"
    #[arg(value_name = "COMMAND")]
    pub execute: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Quiet mode (no banner, error-level logging)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Very verbose mode (trace logging)
    #[arg(long = "vv")]
    pub very_verbose: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands for cosh
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show version information
    Version,

    /// Generate shell completion script
    Completion {
        /// Shell type (bash, zsh, fish, powershell, elvish)
        #[arg(value_name = "SHELL", value_enum)]
        shell: Shell,
    },

    /// Show configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Validate configuration file
        #[arg(long)]
        validate: bool,
    },
}

/// CLI interface handler
pub struct CliInterface {
    /// Parsed command-line arguments
    args: CliArgs,

    /// Loaded configuration
    config: Config,
}

impl CliInterface {
    /// Create a new CLI interface from the process arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn new() -> Result<Self> {
        Self::from_args(CliArgs::parse())
    }

    /// Create a CLI interface from pre-parsed arguments
    ///
    /// # Arguments
    /// * `args` - Parsed arguments
    ///
    /// # Returns
    /// * `Result<Self>` - New CLI interface or error
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self::load_config(&args)?;
        Ok(Self { args, config })
    }

    /// Load configuration from file and merge with arguments
    fn load_config(args: &CliArgs) -> Result<Config> {
        let mut config = Config::load_from_file(args.config_file.as_deref())?;

        if let Err(e) = config.validate() {
            eprintln!("Warning: Configuration validation failed: {e}");
            eprintln!("Using default configuration instead.");
            config = Config::default();
        }

        Self::apply_args_to_config(&mut config, args);
        Ok(config)
    }

    /// Apply CLI arguments to configuration
    ///
    /// Overrides configuration values with CLI arguments where provided
    fn apply_args_to_config(config: &mut Config, args: &CliArgs) {
        if args.no_color {
            config.display.color_output = false;
        }

        config.logging.level = if args.very_verbose {
            LogLevel::Trace
        } else if args.verbose {
            LogLevel::Debug
        } else if args.quiet {
            LogLevel::Error
        } else {
            config.logging.level
        };
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the CLI arguments
    pub fn args(&self) -> &CliArgs {
        &self.args
    }

    /// Effective log level after argument overrides
    pub fn log_level(&self) -> LogLevel {
        self.config.logging.level
    }

    /// Handle subcommands
    ///
    /// # Returns
    /// * `Result<bool>` - True if a subcommand was handled, false to
    ///   continue into the shell
    pub fn handle_subcommand(&self) -> Result<bool> {
        match &self.args.command {
            Some(Commands::Version) => {
                self.show_version();
                Ok(true)
            }
            Some(Commands::Completion { shell }) => {
                self.generate_completion(*shell);
                Ok(true)
            }
            Some(Commands::Config { show, validate }) => {
                self.handle_config_command(*show, *validate)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Show version information
    fn show_version(&self) {
        println!("cosh version {}", env!("CARGO_PKG_VERSION"));
    }

    /// Generate a completion script for the cosh binary itself
    ///
    /// # Arguments
    /// * `shell` - Shell type
    fn generate_completion(&self, shell: Shell) {
        let mut command = CliArgs::command();
        clap_complete::generate(shell, &mut command, "cosh", &mut io::stdout());
    }

    /// Handle config subcommand
    ///
    /// # Arguments
    /// * `show` - Whether to show configuration
    /// * `validate` - Whether to validate configuration file
    fn handle_config_command(&self, show: bool, validate: bool) -> Result<()> {
        if validate {
            self.validate_config_file()?;
        }

        if show {
            self.show_config()?;
        }

        Ok(())
    }

    /// Validate configuration file
    fn validate_config_file(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Validating configuration file: {}", path.display());

        if !path.exists() {
            println!("Configuration file does not exist; defaults apply.");
            return Ok(());
        }

        match Config::load_from_file(self.args.config_file.as_deref()) {
            Ok(config) => match config.validate() {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration validation failed: {e}"),
            },
            Err(e) => println!("Failed to load configuration: {e}"),
        }

        Ok(())
    }

    /// Show effective configuration
    fn show_config(&self) -> Result<()> {
        let path = self.get_config_path();
        println!("Configuration file: {}", path.display());
        println!();
        println!("{}", self.config.to_toml()?);
        Ok(())
    }

    /// Get configuration file path (from args or default)
    fn get_config_path(&self) -> PathBuf {
        self.args
            .config_file
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Print banner with version info
    pub fn print_banner(&self) {
        if !self.args.quiet {
            println!("cosh {} - type 'shell:help' for commands", env!("CARGO_PKG_VERSION"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = CliArgs::try_parse_from(["cosh"]).unwrap();
        assert!(args.execute.is_none());
        assert!(args.config_file.is_none());
        assert!(!args.no_color);
    }

    #[test]
    fn test_cli_args_with_command() {
        let args = CliArgs::try_parse_from(["cosh", "log:set debug"]).unwrap();
        assert_eq!(args.execute, Some("log:set debug".to_string()));
    }

    #[test]
    fn test_cli_args_with_flags() {
        let args = CliArgs::try_parse_from(["cosh", "--no-color", "--quiet"]).unwrap();
        assert!(args.no_color);
        assert!(args.quiet);
    }

    #[test]
    fn test_completion_subcommand_parses_shell() {
        let args = CliArgs::try_parse_from(["cosh", "completion", "zsh"]).unwrap();
        assert!(matches!(
            args.command,
            Some(Commands::Completion { shell: Shell::Zsh })
        ));

        assert!(CliArgs::try_parse_from(["cosh", "completion", "notashell"]).is_err());
    }

    #[test]
    fn test_verbosity_overrides_config_level() {
        let args = CliArgs::try_parse_from(["cosh", "--vv"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Trace);

        let args = CliArgs::try_parse_from(["cosh", "-v"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let args = CliArgs::try_parse_from(["cosh", "-q"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_no_color_overrides_config() {
        let args = CliArgs::try_parse_from(["cosh", "--no-color"]).unwrap();
        let cli = CliInterface::from_args(args).unwrap();
        assert!(!cli.config().display.color_output);
    }
}
