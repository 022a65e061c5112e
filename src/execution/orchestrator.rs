use super::delay::{DelayChoice, StepDelay};
use super::event::{EventBus, EventReceiver, EventSender, ExecutionEvent};
use super::order::execution_order;
use super::state::ExecutionState;
use crate::error::RunError;
use crate::graph::Graph;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

/// How a run that started ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Requests cooperative cancellation of a run from any task or thread.
///
/// The request is honoured at the next step boundary: the step in flight
/// always finishes its delay and completes first.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Configures an `Orchestrator` before its first run.
pub struct OrchestratorBuilder {
    delay: Box<dyn StepDelay>,
    observers: Vec<EventSender>,
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            delay: DelayChoice::default().into_strategy(),
            observers: Vec::new(),
        }
    }

    /// Selects one of the built-in delay strategies.
    pub fn with_delay(mut self, choice: DelayChoice) -> Self {
        self.delay = choice.into_strategy();
        self
    }

    /// Installs a custom delay strategy.
    pub fn with_step_delay(mut self, delay: impl StepDelay + 'static) -> Self {
        self.delay = Box::new(delay);
        self
    }

    /// Registers an event observer that outlives individual runs.
    pub fn with_observer(mut self, sender: EventSender) -> Self {
        self.observers.push(sender);
        self
    }

    pub fn build(self) -> Orchestrator {
        let mut events = EventBus::default();
        for sender in self.observers {
            events.attach(sender);
        }
        let (snapshots, _) = watch::channel(ExecutionState::new());
        Orchestrator {
            delay: self.delay,
            state: ExecutionState::new(),
            events,
            snapshots,
            cancel: CancellationToken::new(),
        }
    }
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a simulated, strictly sequential run over a workflow graph.
///
/// The orchestrator exclusively owns the `ExecutionState` of its runs. A run
/// borrows the orchestrator mutably, so two runs can never overlap on the same
/// instance. Validation is not consulted: structurally invalid graphs run just
/// like valid ones.
pub struct Orchestrator {
    delay: Box<dyn StepDelay>,
    state: ExecutionState,
    events: EventBus,
    snapshots: watch::Sender<ExecutionState>,
    cancel: CancellationToken,
}

impl Orchestrator {
    /// An orchestrator with no step delay and no observers.
    pub fn new() -> Self {
        OrchestratorBuilder::new().build()
    }

    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    pub fn state(&self) -> &ExecutionState {
        &self.state
    }

    /// Opens a new event stream. Only events emitted after this call are delivered.
    pub fn subscribe(&mut self) -> EventReceiver {
        self.events.subscribe()
    }

    /// Receives a fresh `ExecutionState` snapshot after every transition.
    pub fn watch_state(&self) -> watch::Receiver<ExecutionState> {
        self.snapshots.subscribe()
    }

    /// A handle that cancels the run in progress.
    ///
    /// A handle taken while idle stays bound to the next run. Cancelling it
    /// before that run starts has no effect, and every run ends by installing
    /// a new token so handles never outlive the run they stopped.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.cancel.clone(),
        }
    }

    /// Returns a finished orchestrator to `Idle`.
    pub fn reset(&mut self) {
        self.state.reset();
        self.publish();
    }

    /// Runs every node reachable from the start node, one at a time.
    ///
    /// Each step emits `StepStarted`, awaits the configured delay, then marks
    /// the node completed and emits `StepCompleted`. A cancellation request is
    /// checked only after a step completes; when set, the run stops with
    /// `RunCancelled` instead of starting the next step.
    pub async fn run(&mut self, graph: &Graph) -> Result<RunOutcome, RunError> {
        let order = execution_order(graph);
        if order.is_empty() {
            return Err(RunError::EmptyWorkflow);
        }
        if self.cancel.is_cancelled() {
            tracing::debug!("discarding cancellation requested while idle");
            self.cancel = CancellationToken::new();
        }

        let total = order.len();
        tracing::info!(
            steps = total,
            nodes = graph.nodes.len(),
            "starting workflow run"
        );
        self.state.begin(order);
        self.publish();

        for index in 0..total {
            let Some(node_id) = self.state.start_step(index).cloned() else {
                break;
            };
            tracing::debug!(node_id = %node_id, index, total, "step started");
            self.publish();
            self.events.emit(ExecutionEvent::StepStarted {
                node_id: node_id.clone(),
                index,
                total,
            });

            self.delay.pause(&node_id).await;

            let progress = self.state.complete_step();
            tracing::debug!(node_id = %node_id, progress, "step completed");
            self.publish();
            self.events.emit(ExecutionEvent::StepCompleted {
                node_id,
                index,
                total,
                progress,
            });

            if self.cancel.is_cancelled() {
                return Ok(self.end_run(RunOutcome::Cancelled));
            }
        }

        Ok(self.end_run(RunOutcome::Completed))
    }

    fn end_run(&mut self, outcome: RunOutcome) -> RunOutcome {
        match outcome {
            RunOutcome::Completed => {
                self.state.finish();
                tracing::info!(steps = self.state.total(), "workflow run completed");
                self.publish();
                self.events.emit(ExecutionEvent::RunCompleted);
            }
            RunOutcome::Cancelled => {
                self.state.cancel();
                tracing::warn!(
                    completed = self.state.completed_node_ids().len(),
                    total = self.state.total(),
                    "workflow run cancelled"
                );
                self.publish();
                self.events.emit(ExecutionEvent::RunCancelled);
            }
        }
        self.cancel = CancellationToken::new();
        outcome
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
