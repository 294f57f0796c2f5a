use crate::model::{NodeId, Snapshot, StateValue, StatusMap};

/// Cumulative node states across delta snapshots.
///
/// Entries are only ever inserted or overwritten; a node that appeared once keeps a state for
/// the lifetime of the tracker.
#[derive(Clone, Debug, Default)]
pub struct StatusTracker {
    current: StatusMap,
    updates: u64,
}

impl StatusTracker {
    /// Empty tracker: nodes have no state until a snapshot mentions them.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker where every node in `nodes` starts at `baseline`.
    pub fn with_baseline<'a>(
        baseline: &StateValue,
        nodes: impl IntoIterator<Item = &'a NodeId>,
    ) -> Self {
        Self {
            current: nodes
                .into_iter()
                .map(|n| (n.clone(), baseline.clone()))
                .collect(),
            updates: 0,
        }
    }

    /// Merge a delta snapshot, overwriting repeated keys.
    pub fn update(&mut self, snapshot: &Snapshot) {
        for (node, state) in &snapshot.status {
            self.current.insert(node.clone(), state.clone());
        }
        self.updates += 1;
    }

    /// Read-only view of the cumulative states.
    pub fn current(&self) -> &StatusMap {
        &self.current
    }

    /// Current state of one node.
    pub fn get(&self, node: &str) -> Option<&StateValue> {
        self.current.get(node)
    }

    /// Number of snapshots merged so far.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/status.rs"]
mod tests;
