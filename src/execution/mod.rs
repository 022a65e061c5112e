//! Simulated, stepwise execution of a workflow graph.
//!
//! [`execution_order`] decides which nodes run and in what order; the
//! [`Orchestrator`] walks that order one node at a time, records progress in an
//! [`ExecutionState`] and reports every transition as an [`ExecutionEvent`].

mod delay;
mod event;
mod orchestrator;
mod order;
mod state;

pub use delay::{DelayChoice, FixedDelay, NoDelay, StepDelay};
pub use event::{EventReceiver, EventSender, ExecutionEvent, create_event_channel};
pub use orchestrator::{CancelHandle, Orchestrator, OrchestratorBuilder, RunOutcome};
pub use order::{execution_order, select_start_node};
pub use state::{ExecutionState, RunStatus};
