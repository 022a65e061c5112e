use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// The suspension a run performs for each step's simulated work.
///
/// Implementations decide how long (and on which clock) a step takes. The
/// orchestrator awaits the returned future to completion; it is never raced
/// against cancellation.
pub trait StepDelay: Send + Sync {
    fn pause<'a>(&'a self, node_id: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// Steps complete immediately, with a single cooperative yield.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl StepDelay for NoDelay {
    fn pause<'a>(&'a self, _node_id: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::task::yield_now())
    }
}

/// Every step sleeps for the same duration on the tokio clock.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    pub duration: Duration,
}

impl FixedDelay {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl StepDelay for FixedDelay {
    fn pause<'a>(&'a self, _node_id: &'a str) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::time::sleep(self.duration))
    }
}

/// The built-in delay strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelayChoice {
    /// No simulated work. The default for programmatic use.
    #[default]
    None,
    /// A constant pause per step, e.g. one second for a visible demo run.
    Fixed(Duration),
}

impl DelayChoice {
    /// The pacing used by interactive demos.
    pub const DEMO: DelayChoice = DelayChoice::Fixed(Duration::from_secs(1));

    pub(crate) fn into_strategy(self) -> Box<dyn StepDelay> {
        match self {
            DelayChoice::None => Box::new(NoDelay),
            DelayChoice::Fixed(duration) => Box::new(FixedDelay::new(duration)),
        }
    }
}
