use crate::graph::NodeId;
use serde::Serialize;
use tokio::sync::mpsc;

/// Status transitions emitted by the orchestrator while a run progresses.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ExecutionEvent {
    /// A node became the one in flight.
    #[serde(rename_all = "camelCase")]
    StepStarted {
        node_id: NodeId,
        index: usize,
        total: usize,
    },

    /// The node in flight finished its simulated work.
    #[serde(rename_all = "camelCase")]
    StepCompleted {
        node_id: NodeId,
        index: usize,
        total: usize,
        progress: u8,
    },

    /// Every node in the order completed.
    RunCompleted,

    /// The run stopped early on request.
    RunCancelled,
}

impl ExecutionEvent {
    pub fn node_id(&self) -> Option<&str> {
        match self {
            ExecutionEvent::StepStarted { node_id, .. }
            | ExecutionEvent::StepCompleted { node_id, .. } => Some(node_id),
            ExecutionEvent::RunCompleted | ExecutionEvent::RunCancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionEvent::RunCompleted | ExecutionEvent::RunCancelled
        )
    }
}

pub type EventSender = mpsc::UnboundedSender<ExecutionEvent>;

pub type EventReceiver = mpsc::UnboundedReceiver<ExecutionEvent>;

pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Fans events out to every live subscriber, forgetting the ones that hung up.
#[derive(Debug, Default)]
pub(crate) struct EventBus {
    subscribers: Vec<EventSender>,
}

impl EventBus {
    pub(crate) fn attach(&mut self, sender: EventSender) {
        self.subscribers.push(sender);
    }

    pub(crate) fn subscribe(&mut self) -> EventReceiver {
        let (sender, receiver) = create_event_channel();
        self.attach(sender);
        receiver
    }

    pub(crate) fn emit(&mut self, event: ExecutionEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
