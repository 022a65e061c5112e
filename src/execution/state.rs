use crate::graph::NodeId;
use ahash::AHashSet;
use serde::Serialize;

/// Lifecycle of a run: `Idle -> Running -> Completed | Cancelled`.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Cancelled)
    }
}

/// Progress of a single run, owned and mutated only by the orchestrator.
///
/// Observers see it through shared references or cloned snapshots. Within a run
/// the completed set only grows and `progress` never decreases.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionState {
    order: Vec<NodeId>,
    current_index: Option<usize>,
    executing_node_id: Option<NodeId>,
    completed_node_ids: AHashSet<NodeId>,
    status: RunStatus,
    progress: u8,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The nodes this run visits, in order.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    pub fn total(&self) -> usize {
        self.order.len()
    }

    /// Index of the step in flight (or last reached). `None` before the first
    /// step; equal to `total()` once the run completed.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn executing_node_id(&self) -> Option<&str> {
        self.executing_node_id.as_deref()
    }

    pub fn completed_node_ids(&self) -> &AHashSet<NodeId> {
        &self.completed_node_ids
    }

    pub fn is_completed(&self, node_id: &str) -> bool {
        self.completed_node_ids.contains(node_id)
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Percentage of steps completed, rounded to the nearest integer.
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Drops all run data and returns to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn begin(&mut self, order: Vec<NodeId>) {
        *self = Self {
            order,
            status: RunStatus::Running,
            ..Self::default()
        };
    }

    pub(crate) fn start_step(&mut self, index: usize) -> Option<&NodeId> {
        let node_id = self.order.get(index)?.clone();
        self.current_index = Some(index);
        self.executing_node_id = Some(node_id);
        self.status = RunStatus::Running;
        self.executing_node_id.as_ref()
    }

    /// Marks the node in flight as done and returns the updated progress.
    pub(crate) fn complete_step(&mut self) -> u8 {
        if let Some(node_id) = self.executing_node_id.take() {
            self.completed_node_ids.insert(node_id);
        }
        let done = self.current_index.map_or(0, |index| index + 1);
        self.progress = self.progress.max(percent(done, self.order.len()));
        self.progress
    }

    pub(crate) fn finish(&mut self) {
        self.executing_node_id = None;
        self.current_index = Some(self.order.len());
        self.status = RunStatus::Completed;
    }

    pub(crate) fn cancel(&mut self) {
        self.executing_node_id = None;
        self.status = RunStatus::Cancelled;
    }
}

fn percent(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (100.0 * done as f64 / total as f64).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<NodeId> {
        ids.iter().map(|id| id.to_string()).collect()
    }

    #[test]
    fn progress_rounds_to_nearest_percent() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(3, 3), 100);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn steps_extend_the_completed_set() {
        let mut state = ExecutionState::new();
        state.begin(order(&["s", "a", "e"]));
        assert_eq!(state.status(), RunStatus::Running);
        assert_eq!(state.current_index(), None);

        assert_eq!(state.start_step(0).map(String::as_str), Some("s"));
        assert_eq!(state.executing_node_id(), Some("s"));
        assert_eq!(state.complete_step(), 33);
        assert_eq!(state.executing_node_id(), None);
        assert!(state.is_completed("s"));

        state.start_step(1);
        state.complete_step();
        state.start_step(2);
        assert_eq!(state.complete_step(), 100);

        state.finish();
        assert_eq!(state.status(), RunStatus::Completed);
        assert_eq!(state.current_index(), Some(3));
        assert_eq!(state.completed_node_ids().len(), 3);
    }

    #[test]
    fn start_step_out_of_range_is_ignored() {
        let mut state = ExecutionState::new();
        state.begin(order(&["s"]));
        assert!(state.start_step(5).is_none());
        assert_eq!(state.current_index(), None);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut state = ExecutionState::new();
        state.begin(order(&["s"]));
        state.start_step(0);
        state.cancel();
        assert_eq!(state.status(), RunStatus::Cancelled);
        assert!(state.status().is_terminal());

        state.reset();
        assert_eq!(state, ExecutionState::new());
        assert_eq!(state.status(), RunStatus::Idle);
    }
}
