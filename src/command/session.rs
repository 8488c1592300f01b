//! Session context handed to command actions
//!
//! A [`Session`] bundles everything a command needs at execution time:
//! shared REPL state, the effective configuration, session timing, and the
//! handle for retargeting the log filter at runtime.

use chrono::{DateTime, Local};
use tracing::warn;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::reload;

use crate::config::{Config, LogLevel};
use crate::repl::SharedState;

/// Handle for swapping the global log filter while the shell runs.
///
/// Absent when logging is driven by `RUST_LOG`, in which case `log:set`
/// only records the level in shared state.
pub type LogReloadHandle = reload::Handle<LevelFilter, Registry>;

/// Execution context for command actions.
pub struct Session {
    shared: SharedState,
    config: Config,
    started_at: DateTime<Local>,
    log_handle: Option<LogReloadHandle>,
}

impl Session {
    /// Create a session.
    ///
    /// # Arguments
    /// * `shared` - Shared REPL state
    /// * `config` - Effective configuration
    pub fn new(shared: SharedState, config: Config) -> Self {
        Self {
            shared,
            config,
            started_at: Local::now(),
            log_handle: None,
        }
    }

    /// Attach the log reload handle produced at logging setup.
    pub fn with_log_handle(mut self, handle: Option<LogReloadHandle>) -> Self {
        self.log_handle = handle;
        self
    }

    /// Shared REPL state
    pub fn shared(&self) -> &SharedState {
        &self.shared
    }

    /// Effective configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// When the session started
    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    /// Seconds since the session started
    pub fn uptime_seconds(&self) -> i64 {
        (Local::now() - self.started_at).num_seconds()
    }

    /// Change the session log level, retargeting the live filter when the
    /// shell owns it.
    pub fn set_log_level(&self, level: LogLevel) {
        self.shared.set_log_level(level);
        if let Some(handle) = &self.log_handle {
            let filter = LevelFilter::from_level(level.to_tracing_level());
            if let Err(err) = handle.reload(filter) {
                warn!(%err, "failed to reload log filter");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_setters() {
        let session = Session::new(SharedState::default(), Config::default());
        assert!(session.uptime_seconds() >= 0);

        session.set_log_level(LogLevel::Debug);
        assert_eq!(session.shared().log_level(), LogLevel::Debug);
    }
}
