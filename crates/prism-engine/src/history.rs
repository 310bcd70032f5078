//! The ordered record of every frame a simulation emitted.
//!
//! [`History`] is the surface handed to renderers: entries appear in the
//! exact order they were produced, script step by script step, and each
//! owns (a shared handle to) its state.

use std::sync::Arc;

use prism_core::State;
use prism_operator::Operator;

/// One recorded frame.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    /// Index of the script step that produced this frame.
    pub script_index: usize,
    /// The operator that produced it.
    pub operator: Operator,
    /// Step index within that operator's sequence.
    pub step: u32,
    /// Progress fraction within that operator's sequence.
    pub progress: f64,
    /// The emitted state.
    pub state: Arc<State>,
}

/// Ordered buffer of [`HistoryEntry`] values.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// An empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded frames.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at position `i`.
    pub fn get(&self, i: usize) -> Option<&HistoryEntry> {
        self.entries.get(i)
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Entries in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Recorded states in order.
    pub fn states(&self) -> impl Iterator<Item = &State> + '_ {
        self.entries.iter().map(|e| e.state.as_ref())
    }

    /// Entries produced by script step `script_index`.
    pub fn for_script_step(&self, script_index: usize) -> impl Iterator<Item = &HistoryEntry> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.script_index == script_index)
    }

    /// Total magnitude of each recorded state, in order.
    pub fn magnitude_trace(&self) -> Vec<u64> {
        self.states().map(State::total_magnitude).collect()
    }

    pub(crate) fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
