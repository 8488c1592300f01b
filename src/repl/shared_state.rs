use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::config::{DisplayConfig, LogLevel};

/// Shared state between the REPL front end and command actions.
#[derive(Debug, Clone)]
pub struct SharedState {
    /// Color output setting
    color_enabled: Arc<RwLock<bool>>,

    /// Effective session log level
    log_level: Arc<RwLock<LogLevel>>,

    /// Whether the shell should keep reading lines
    running: Arc<AtomicBool>,

    /// Number of commands executed this session
    commands_run: Arc<AtomicU64>,
}

impl SharedState {
    /// Create a new shared state.
    ///
    /// # Arguments
    /// * `display` - Display configuration settings
    /// * `log_level` - Initial log level
    pub fn new(display: &DisplayConfig, log_level: LogLevel) -> Self {
        Self {
            color_enabled: Arc::new(RwLock::new(display.color_output)),
            log_level: Arc::new(RwLock::new(log_level)),
            running: Arc::new(AtomicBool::new(true)),
            commands_run: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Whether colored output is enabled
    pub fn color_enabled(&self) -> bool {
        *self.color_enabled.read().unwrap()
    }

    /// Enable or disable colored output
    pub fn set_color_enabled(&self, enabled: bool) {
        *self.color_enabled.write().unwrap() = enabled;
    }

    /// Current session log level
    pub fn log_level(&self) -> LogLevel {
        *self.log_level.read().unwrap()
    }

    /// Record a new session log level
    pub fn set_log_level(&self, level: LogLevel) {
        *self.log_level.write().unwrap() = level;
    }

    /// Whether the shell should keep running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Ask the read loop to stop after the current command
    pub fn request_exit(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Count one executed command
    pub fn record_command(&self) {
        self.commands_run.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of commands executed this session
    pub fn commands_run(&self) -> u64 {
        self.commands_run.load(Ordering::Relaxed)
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(&DisplayConfig::default(), LogLevel::Warn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = SharedState::default();
        assert!(state.color_enabled());
        assert!(state.is_running());
        assert_eq!(state.commands_run(), 0);
    }

    #[test]
    fn test_exit_request_is_shared() {
        let state = SharedState::default();
        let clone = state.clone();
        clone.request_exit();
        assert!(!state.is_running());
    }

    #[test]
    fn test_command_counter() {
        let state = SharedState::default();
        state.record_command();
        state.record_command();
        assert_eq!(state.commands_run(), 2);
    }

    #[test]
    fn test_log_level_round_trip() {
        let state = SharedState::default();
        state.set_log_level(LogLevel::Trace);
        assert_eq!(state.log_level(), LogLevel::Trace);
    }
}
