//! cosh - Console Shell
//!
//! An interactive console shell with scoped commands (`scope:name`),
//! declarative option tables and grammar-aware TAB completion.
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! cosh
//!
//! # One-shot execution
//! cosh "log:set debug"
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::reload;
use tracing_subscriber::util::SubscriberInitExt;

use cosh::cli::CliInterface;
use cosh::command::{CommandRegistry, LogReloadHandle, Session, builtin};
use cosh::error::Result;
use cosh::repl::{ReplEngine, SharedState};

/// Application entry point
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands (version, completion, config)
/// 4. Run the one-shot command or the interactive shell
fn run() -> Result<()> {
    let cli = CliInterface::new()?;
    let log_handle = initialize_logging(&cli);

    if cli.handle_subcommand()? {
        return Ok(());
    }

    let mut registry = CommandRegistry::new();
    builtin::install(&mut registry);
    registry.set_strict(cli.config().completion.strict);

    let shared = SharedState::new(&cli.config().display, cli.log_level());
    let session =
        Session::new(shared, cli.config().clone()).with_log_handle(log_handle);

    if let Some(line) = &cli.args().execute {
        return execute_line(&registry, &session, line);
    }

    cli.print_banner();
    run_repl_loop(&cli, &registry, &session)
}

/// Execute a single command line and print its output
fn execute_line(registry: &CommandRegistry, session: &Session, line: &str) -> Result<()> {
    if let Some(output) = registry.execute(session, line)? {
        println!("{}", output);
    }
    Ok(())
}

/// Main REPL loop
fn run_repl_loop(
    cli: &CliInterface,
    registry: &CommandRegistry,
    session: &Session,
) -> Result<()> {
    let mut repl = ReplEngine::new(cli.config(), registry)?;

    while session.shared().is_running() {
        let input = match repl.read_line()? {
            Some(line) if !line.trim().is_empty() => line,
            Some(_) => continue,
            None => break,
        };

        match registry.execute(session, &input) {
            Ok(Some(output)) => println!("{}", output),
            Ok(None) => {}
            Err(e) => eprintln!("{}", e),
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Initialize the logging system
///
/// `RUST_LOG` takes precedence when set; otherwise the level comes from
/// configuration and verbosity flags, behind a reload handle so `log:set`
/// can retarget it at runtime.
fn initialize_logging(cli: &CliInterface) -> Option<LogReloadHandle> {
    let timestamps = cli.config().logging.timestamps;

    if std::env::var("RUST_LOG").is_ok() {
        let base = tracing_subscriber::registry().with(EnvFilter::from_default_env());
        if timestamps {
            base.with(tracing_subscriber::fmt::layer().with_target(false)).init();
        } else {
            base.with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .without_time(),
            )
            .init();
        }
        return None;
    }

    let level = LevelFilter::from_level(cli.log_level().to_tracing_level());
    let (filter, handle) = reload::Layer::new(level);
    let base = tracing_subscriber::registry().with(filter);
    if timestamps {
        base.with(tracing_subscriber::fmt::layer().with_target(false)).init();
    } else {
        base.with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .init();
    }
    Some(handle)
}
