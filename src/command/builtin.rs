//! Built-in shell commands
//!
//! The standard command set every cosh session starts with. Each command is
//! declared as a [`CommandSpec`] plus an [`Action`]; positional completers
//! are attached at registration so TAB completion works out of the box.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Local;
use serde_json::json;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::LogLevel;
use crate::error::{CommandError, Result};
use crate::repl::completion::{HELP_OPTION, StringsCompleter};

use super::registry::{Action, CommandRegistry};
use super::session::Session;
use super::spec::{CommandSpec, OptionSpec};

/// Register the built-in command set.
pub fn install(registry: &mut CommandRegistry) {
    registry.register(
        CommandSpec::new("shell", "echo", "Print arguments to the console")
            .option(OptionSpec::flag("--upper", "Uppercase the output").with_alias("-u"))
            .arg("[text...]"),
        Box::new(EchoAction),
        Vec::new(),
    );

    registry.register(
        CommandSpec::new("shell", "info", "Show session information"),
        Box::new(InfoAction),
        Vec::new(),
    );

    registry.register(
        CommandSpec::new("shell", "exit", "Leave the shell"),
        Box::new(ExitAction),
        Vec::new(),
    );

    registry.register(
        CommandSpec::new("log", "get", "Show the session log level"),
        Box::new(LogGetAction),
        Vec::new(),
    );

    registry.register(
        CommandSpec::new("log", "set", "Set the session log level").arg("<level>"),
        Box::new(LogSetAction),
        vec![Arc::new(StringsCompleter::new(LogLevel::NAMES))],
    );

    registry.register(
        CommandSpec::new("completion", "strict", "Show or toggle strict completion")
            .option(OptionSpec::flag("--on", "Require earlier tokens to validate"))
            .option(OptionSpec::flag("--off", "Complete at the cursor slot regardless")),
        Box::new(StrictAction),
        Vec::new(),
    );

    registry.register(
        CommandSpec::new("dev", "dump-create", "Write a diagnostic dump file")
            .option(
                OptionSpec::valued("--directory", "Directory to write the dump into")
                    .with_alias("-d"),
            )
            .arg("[name]"),
        Box::new(DumpCreateAction),
        Vec::new(),
    );

    // Help goes last so its completer covers every registered name,
    // including its own.
    let mut names = registry.names();
    names.push("shell:help".to_string());
    names.push("help".to_string());
    registry.register(
        CommandSpec::new("shell", "help", "Describe commands").arg("[command]"),
        Box::new(HelpAction),
        vec![Arc::new(StringsCompleter::new(names))],
    );
}

/* ============================== shell:help ============================== */

struct HelpAction;

impl Action for HelpAction {
    fn run(
        &self,
        _session: &Session,
        registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>> {
        match argv.first() {
            Some(name) => Ok(Some(describe_command(registry, name)?)),
            None => Ok(Some(list_commands(registry))),
        }
    }
}

fn list_commands(registry: &CommandRegistry) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Command", "Description"]);
    for spec in registry.specs() {
        builder.push_record([spec.full_name(), spec.summary.clone()]);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    table.to_string()
}

fn describe_command(registry: &CommandRegistry, name: &str) -> Result<String> {
    let command = registry.find(name)?;
    let spec = command.spec();

    let mut out = format!("{}\n\n  {}\n", spec.usage(), spec.summary);

    // Every command answers to --help, declared or not.
    let mut options = spec.options.clone();
    if !options.iter().any(|o| o.name == HELP_OPTION) {
        options.push(OptionSpec::flag(HELP_OPTION, "Display this help message"));
    }

    let mut builder = Builder::default();
    builder.push_record(["Option", "Value", "Description"]);
    for option in &options {
        let mut names = vec![option.name.clone()];
        names.extend(option.aliases.iter().cloned());
        builder.push_record([
            names.join(", "),
            if option.takes_value { "yes" } else { "" }.to_string(),
            option.description.clone(),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::psql());
    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');

    Ok(out)
}

/* ============================== shell:echo ============================== */

struct EchoAction;

impl Action for EchoAction {
    fn run(
        &self,
        _session: &Session,
        _registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>> {
        let mut upper = false;
        let mut words: Vec<&str> = Vec::new();

        for arg in argv {
            match arg.as_str() {
                "--upper" | "-u" => upper = true,
                other => words.push(other),
            }
        }

        let mut text = words.join(" ");
        if upper {
            text = text.to_uppercase();
        }
        Ok(Some(text))
    }
}

/* ============================== shell:info ============================== */

struct InfoAction;

impl Action for InfoAction {
    fn run(
        &self,
        session: &Session,
        registry: &CommandRegistry,
        _argv: &[String],
    ) -> Result<Option<String>> {
        let info = format!(
            "cosh {}\nHost:              {}\nStarted:           {}\nUptime:            {}s\nCommands run:      {}\nLog level:         {}\nStrict completion: {}",
            env!("CARGO_PKG_VERSION"),
            host_name(),
            session.started_at().format("%Y-%m-%d %H:%M:%S"),
            session.uptime_seconds(),
            session.shared().commands_run(),
            session.shared().log_level(),
            if registry.strict() { "on" } else { "off" },
        );
        Ok(Some(info))
    }
}

fn host_name() -> String {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .unwrap_or_else(|_| "unknown".to_string())
}

/* ============================== shell:exit ============================== */

struct ExitAction;

impl Action for ExitAction {
    fn run(
        &self,
        session: &Session,
        _registry: &CommandRegistry,
        _argv: &[String],
    ) -> Result<Option<String>> {
        session.shared().request_exit();
        Ok(None)
    }
}

/* ============================= log:get/set ============================== */

struct LogGetAction;

impl Action for LogGetAction {
    fn run(
        &self,
        session: &Session,
        _registry: &CommandRegistry,
        _argv: &[String],
    ) -> Result<Option<String>> {
        Ok(Some(format!("Log level: {}", session.shared().log_level())))
    }
}

struct LogSetAction;

impl Action for LogSetAction {
    fn run(
        &self,
        session: &Session,
        _registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>> {
        let Some(name) = argv.first() else {
            return Err(CommandError::InvalidArguments {
                command: "log:set".to_string(),
                reason: "expected a level name".to_string(),
            }
            .into());
        };

        let Some(level) = LogLevel::parse(name) else {
            return Err(CommandError::InvalidArguments {
                command: "log:set".to_string(),
                reason: format!("unknown level '{name}' (expected one of: {})", LogLevel::NAMES.join(", ")),
            }
            .into());
        };

        session.set_log_level(level);
        Ok(Some(format!("Log level set to {level}")))
    }
}

/* =========================== completion:strict ========================== */

struct StrictAction;

impl Action for StrictAction {
    fn run(
        &self,
        _session: &Session,
        registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>> {
        let on = argv.iter().any(|a| a == "--on");
        let off = argv.iter().any(|a| a == "--off");

        match (on, off) {
            (true, true) => Err(CommandError::InvalidArguments {
                command: "completion:strict".to_string(),
                reason: "--on and --off are mutually exclusive".to_string(),
            }
            .into()),
            (true, false) => {
                registry.set_strict(true);
                Ok(Some("Strict completion enabled".to_string()))
            }
            (false, true) => {
                registry.set_strict(false);
                Ok(Some("Strict completion disabled".to_string()))
            }
            (false, false) => Ok(Some(format!(
                "Strict completion is {}",
                if registry.strict() { "on" } else { "off" }
            ))),
        }
    }
}

/* ============================ dev:dump-create =========================== */

struct DumpCreateAction;

impl Action for DumpCreateAction {
    fn run(
        &self,
        session: &Session,
        registry: &CommandRegistry,
        argv: &[String],
    ) -> Result<Option<String>> {
        let mut directory = PathBuf::from(".");
        let mut name: Option<String> = None;

        let mut iter = argv.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--directory" | "-d" => {
                    let Some(dir) = iter.next() else {
                        return Err(CommandError::InvalidArguments {
                            command: "dev:dump-create".to_string(),
                            reason: "--directory expects a path".to_string(),
                        }
                        .into());
                    };
                    directory = PathBuf::from(dir);
                }
                other if !other.starts_with('-') => name = Some(other.to_string()),
                _ => {}
            }
        }

        let name = name.unwrap_or_else(|| {
            format!("cosh-dump-{}.json", Local::now().format("%Y%m%d-%H%M%S"))
        });
        let path = directory.join(name);

        let commands: Vec<serde_json::Value> = registry
            .specs()
            .map(|spec| json!({ "name": spec.full_name(), "summary": spec.summary }))
            .collect();
        let dump = json!({
            "created_at": Local::now().to_rfc3339(),
            "host": host_name(),
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": session.uptime_seconds(),
            "commands_run": session.shared().commands_run(),
            "log_level": session.shared().log_level().name(),
            "strict_completion": registry.strict(),
            "commands": commands,
            "config": serde_json::to_value(session.config())
                .unwrap_or(serde_json::Value::Null),
        });

        std::fs::write(&path, serde_json::to_string_pretty(&dump).unwrap_or_default())?;
        Ok(Some(format!("Diagnostic dump created: {}", path.display())))
    }
}
