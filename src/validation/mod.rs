//! Structural validation of workflow graphs.
//!
//! [`validate`] is a pure function over a [`Graph`] snapshot. Every check always
//! runs and issues come back in a fixed order: check by check, and within a
//! check in node (or edge) insertion order. Issues are data, never errors; a
//! caller decides whether an `Error` severity blocks a run.

use crate::graph::{Graph, NodeId};
use serde::Serialize;
use std::fmt;

mod checks;

/// How serious a structural issue is.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Machine-readable identifier of the check that produced an issue.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum IssueCode {
    NoStartNode,
    MultipleStartNodes,
    NoEndNode,
    DisconnectedNode,
    DecisionFanOut,
    DanglingEdge,
    DuplicateNodeId,
    DuplicateEdgeId,
}

/// A single finding reported by the validator.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: IssueCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<NodeId>,
}

impl ValidationIssue {
    pub(crate) fn error(code: IssueCode, message: String, node_id: Option<&str>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message,
            node_id: node_id.map(str::to_string),
        }
    }

    pub(crate) fn warning(code: IssueCode, message: String, node_id: Option<&str>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message,
            node_id: node_id.map(str::to_string),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", tag, self.message)
    }
}

/// The ordered result of validating one graph snapshot.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<ValidationIssue> {
        self.issues
    }

    /// `true` when the graph produced no issues at all.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(ValidationIssue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationIssue;
    type IntoIter = std::vec::IntoIter<ValidationIssue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

/// Runs every structural check against `graph`.
pub fn validate(graph: &Graph) -> ValidationReport {
    let adjacency = graph.adjacency();
    let mut issues = Vec::new();

    checks::start_node_count(graph, &mut issues);
    checks::end_node_count(graph, &mut issues);
    checks::connectivity(graph, &mut issues);
    checks::decision_fan_out(graph, &adjacency, &mut issues);
    checks::dangling_edges(graph, &mut issues);
    checks::duplicate_node_ids(graph, &mut issues);
    checks::duplicate_edge_ids(graph, &mut issues);

    tracing::debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        issues = issues.len(),
        "validated workflow graph"
    );
    ValidationReport { issues }
}
