//! # Keiro - Workflow Graph Validation and Execution Engine
//!
//! **Keiro** models directed workflow graphs made of start, end, process and
//! decision nodes, checks their structure, and drives a simulated, stepwise run
//! over them while reporting per-node status to any number of observers.
//!
//! ## Core Workflow
//!
//! The engine only ever consumes a graph snapshot. Editors, file importers and
//! generator services all hand over the same canonical [`graph::Graph`]:
//!
//! 1.  **Load a snapshot**: build one with `GraphBuilder`, deserialize it, or convert a
//!     foreign format through the `IntoGraph` trait (the editor's JSON export is supported
//!     out of the box by `WorkflowDocument`).
//! 2.  **Validate**: `validate` returns an ordered `ValidationReport`. Issues are advisory
//!     data; whether an `Error` blocks a run is the caller's decision.
//! 3.  **Run**: an `Orchestrator` computes a breadth-first order from the start node and
//!     visits the reachable nodes one at a time, emitting `ExecutionEvent`s and updating an
//!     `ExecutionState`. Runs can be cancelled cooperatively through a `CancelHandle`.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let mut builder = GraphBuilder::new();
//! let start = builder.add_node(NodeKind::Start);
//! let check = builder.add_labeled_node(NodeKind::Decision, "In stock?");
//! let ship = builder.add_labeled_node(NodeKind::Process, "Ship order");
//! let end = builder.add_node(NodeKind::End);
//! builder.connect(&start, &check);
//! builder.connect_via(&check, "yes", &ship, "in");
//! builder.connect_via(&check, "no", &end, "in");
//! builder.connect(&ship, &end);
//! let graph = builder.build();
//!
//! // 1. Structural checks never fail, they report.
//! let report = validate(&graph);
//! assert!(report.is_empty());
//!
//! // 2. Run it, watching the events as they arrive.
//! let mut orchestrator = Orchestrator::builder()
//!     .with_delay(DelayChoice::None)
//!     .build();
//! let mut events = orchestrator.subscribe();
//!
//! let outcome = orchestrator.run(&graph).await?;
//! assert_eq!(outcome, RunOutcome::Completed);
//! assert_eq!(orchestrator.state().progress(), 100);
//!
//! while let Ok(event) = events.try_recv() {
//!     println!("{:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod error;
pub mod execution;
pub mod graph;
pub mod prelude;
pub mod store;
pub mod validation;
