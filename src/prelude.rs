//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the keiro crate.
//! Import this module to get access to the core functionality without having to import
//! each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use keiro::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let json = std::fs::read_to_string("path/to/workflow.json")?;
//! let graph = WorkflowDocument::from_json(&json)?.into_graph()?;
//!
//! for issue in validate(&graph).issues() {
//!     println!("{}", issue);
//! }
//! println!("Execution order: {:?}", execution_order(&graph));
//! # Ok(())
//! # }
//! ```

// Graph model
pub use crate::graph::{Edge, Graph, GraphBuilder, Node, NodeId, NodeKind, Position};

// Validation
pub use crate::validation::{IssueCode, Severity, ValidationIssue, ValidationReport, validate};

// Execution
pub use crate::execution::{
    CancelHandle, DelayChoice, ExecutionEvent, ExecutionState, Orchestrator, RunOutcome,
    RunStatus, StepDelay, execution_order,
};

// Document boundary
pub use crate::document::{IntoGraph, WorkflowDocument};

// Error types
pub use crate::error::{ConversionError, GraphError, RunError, StoreError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
