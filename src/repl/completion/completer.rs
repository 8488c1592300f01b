//! Completer capability and its basic variants
//!
//! A completer answers one question: given the token under the cursor, which
//! full tokens could it become? The trait is object safe so completers can be
//! composed; the argument completion engine implements it too, which is what
//! lets one engine per command nest inside the shell-wide completer.

use std::collections::BTreeSet;
use std::sync::Arc;

/// A completion strategy.
///
/// `partial` is the whole token under the cursor and `offset` is the cursor
/// position within it. Matching candidates are appended to `candidates`; the
/// returned value is the insertion offset relative to the start of the token,
/// or `None` when no completion applies at this position.
pub trait Completer: Send + Sync {
    /// Propose completions for a partial token.
    ///
    /// # Arguments
    /// * `partial` - The token under the cursor
    /// * `offset` - Cursor offset within the token
    /// * `candidates` - Output collection candidates are appended to
    ///
    /// # Returns
    /// * `Option<usize>` - In-token insertion offset, or `None` for
    ///   "do not complete here"
    fn complete(&self, partial: &str, offset: usize, candidates: &mut Vec<String>) -> Option<usize>;
}

/// Completer over a fixed set of known strings.
///
/// Candidates are kept sorted so completion output is deterministic. Matching
/// replaces the whole token: every stored string starting with the partial
/// token is a candidate and the insertion offset is always `0`.
#[derive(Debug, Clone, Default)]
pub struct StringsCompleter {
    strings: BTreeSet<String>,
}

impl StringsCompleter {
    /// Create a completer from any collection of strings.
    pub fn new<I, S>(strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            strings: strings.into_iter().map(Into::into).collect(),
        }
    }

    /// The candidate universe, sorted.
    pub fn strings(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}

impl Completer for StringsCompleter {
    fn complete(&self, partial: &str, _offset: usize, candidates: &mut Vec<String>) -> Option<usize> {
        let before = candidates.len();
        for s in &self.strings {
            if s.starts_with(partial) {
                candidates.push(s.clone());
            }
        }

        if candidates.len() == before {
            None
        } else {
            Some(0)
        }
    }
}

/// Completer for free-form grammar slots.
///
/// Never proposes anything; it exists so the engine can mark a slot as
/// "accepts any token" and keep walking the grammar without failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCompleter;

impl Completer for NullCompleter {
    fn complete(
        &self,
        _partial: &str,
        _offset: usize,
        _candidates: &mut Vec<String>,
    ) -> Option<usize> {
        None
    }
}

/// Completer that merges the results of several child completers.
///
/// Every child gets a chance; candidates are taken from the children that
/// agree on the greatest insertion offset, deduplicated and sorted. This is
/// how the shell-wide completer fans out across one engine per registered
/// command: engines for commands that do not match the typed line return
/// `None` and drop out on their own.
pub struct AggregateCompleter {
    completers: Vec<Arc<dyn Completer>>,
}

impl AggregateCompleter {
    /// Create an aggregate over the given children.
    pub fn new(completers: Vec<Arc<dyn Completer>>) -> Self {
        Self { completers }
    }
}

impl Completer for AggregateCompleter {
    fn complete(&self, partial: &str, offset: usize, candidates: &mut Vec<String>) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut merged: Vec<(usize, Vec<String>)> = Vec::new();

        for completer in &self.completers {
            let mut child = Vec::new();
            if let Some(pos) = completer.complete(partial, offset, &mut child) {
                best = Some(best.map_or(pos, |b| b.max(pos)));
                merged.push((pos, child));
            }
        }

        let best = best?;
        let mut collected: Vec<String> = merged
            .into_iter()
            .filter(|(pos, _)| *pos == best)
            .flat_map(|(_, child)| child)
            .collect();
        collected.sort();
        collected.dedup();
        candidates.extend(collected);

        Some(best)
    }
}
