//! Option lookup table for the completion engine
//!
//! Built once per command from its declared [`OptionSpec`]s: the canonical
//! name and every alias become keys pointing at the same descriptor, plus a
//! reserved `--help` entry when the command does not declare one itself.
//! The table is never mutated after construction, so it is safe to share
//! read-only across concurrent completion calls.

use std::collections::HashMap;
use std::sync::Arc;

use crate::command::OptionSpec;

/// Reserved help option registered for every command.
pub const HELP_OPTION: &str = "--help";

/// Immutable option-name lookup table.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    entries: HashMap<String, Arc<OptionSpec>>,
}

impl OptionTable {
    /// Build the table from a command's declared options.
    ///
    /// # Panics
    ///
    /// Panics when two descriptors claim the same name or alias. Colliding
    /// keys are a mistake in the command declaration, caught the first time
    /// the command is registered rather than at completion time.
    pub fn from_specs(specs: &[OptionSpec]) -> Self {
        let mut entries = HashMap::new();

        for spec in specs {
            let descriptor = Arc::new(spec.clone());
            Self::register(&mut entries, &spec.name, Arc::clone(&descriptor));
            for alias in &spec.aliases {
                Self::register(&mut entries, alias, Arc::clone(&descriptor));
            }
        }

        if !entries.contains_key(HELP_OPTION) {
            entries.insert(
                HELP_OPTION.to_string(),
                Arc::new(OptionSpec::flag(HELP_OPTION, "Display this help message")),
            );
        }

        Self { entries }
    }

    fn register(
        entries: &mut HashMap<String, Arc<OptionSpec>>,
        key: &str,
        descriptor: Arc<OptionSpec>,
    ) {
        if entries.insert(key.to_string(), descriptor).is_some() {
            panic!("duplicate option key in command declaration: {key}");
        }
    }

    /// Look up the descriptor registered under a name or alias.
    pub fn lookup(&self, token: &str) -> Option<&OptionSpec> {
        self.entries.get(token).map(Arc::as_ref)
    }

    /// Every registered key (names and aliases), for the options completer.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Number of registered keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty (it never is: `--help` is always present).
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
