use super::{IssueCode, ValidationIssue};
use crate::graph::{Adjacency, Graph, NodeKind};
use ahash::AHashSet;
use itertools::Itertools;

pub(super) fn start_node_count(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    match graph.nodes_of_kind(NodeKind::Start).count() {
        0 => issues.push(ValidationIssue::error(
            IssueCode::NoStartNode,
            "No start node found. Add a start node to begin the workflow.".to_string(),
            None,
        )),
        1 => {}
        _ => issues.push(ValidationIssue::error(
            IssueCode::MultipleStartNodes,
            "Multiple start nodes found. There should be only one start node.".to_string(),
            None,
        )),
    }
}

// Any number of end nodes is fine, only their absence is reported.
pub(super) fn end_node_count(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    if graph.nodes_of_kind(NodeKind::End).next().is_none() {
        issues.push(ValidationIssue::error(
            IssueCode::NoEndNode,
            "No end node found. Add an end node to complete the workflow.".to_string(),
            None,
        ));
    }
}

/// Every non-start node must be referenced by at least one edge endpoint.
pub(super) fn connectivity(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    let referenced: AHashSet<&str> = graph
        .edges
        .iter()
        .flat_map(|edge| [edge.source.as_str(), edge.target.as_str()])
        .collect();

    for node in &graph.nodes {
        if node.kind == NodeKind::Start || referenced.contains(node.id.as_str()) {
            continue;
        }
        issues.push(ValidationIssue::error(
            IssueCode::DisconnectedNode,
            format!(
                "Node \"{}\" is disconnected from the workflow",
                node.display_name()
            ),
            Some(node.id.as_str()),
        ));
    }
}

pub(super) fn decision_fan_out(
    graph: &Graph,
    adjacency: &Adjacency<'_>,
    issues: &mut Vec<ValidationIssue>,
) {
    for node in graph.nodes_of_kind(NodeKind::Decision) {
        let fan_out = adjacency.fan_out(&node.id);
        if fan_out != 2 {
            issues.push(ValidationIssue::error(
                IssueCode::DecisionFanOut,
                format!(
                    "Decision node \"{}\" must have exactly 2 outgoing edges (currently has {})",
                    node.display_name(),
                    fan_out
                ),
                Some(node.id.as_str()),
            ));
        }
    }
}

pub(super) fn dangling_edges(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    let known: AHashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();

    for edge in &graph.edges {
        let missing = [("source", &edge.source), ("target", &edge.target)]
            .into_iter()
            .filter(|(_, id)| !known.contains(id.as_str()))
            .map(|(end, id)| format!("{} \"{}\"", end, id))
            .join(" and ");
        if missing.is_empty() {
            continue;
        }
        issues.push(ValidationIssue::error(
            IssueCode::DanglingEdge,
            format!("Edge \"{}\" references a missing {}", edge.id, missing),
            None,
        ));
    }
}

pub(super) fn duplicate_node_ids(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for id in graph.nodes.iter().map(|node| node.id.as_str()).duplicates() {
        let count = graph.nodes.iter().filter(|node| node.id == id).count();
        issues.push(ValidationIssue::error(
            IssueCode::DuplicateNodeId,
            format!("Node id \"{}\" is shared by {} nodes", id, count),
            Some(id),
        ));
    }
}

pub(super) fn duplicate_edge_ids(graph: &Graph, issues: &mut Vec<ValidationIssue>) {
    for id in graph.edges.iter().map(|edge| edge.id.as_str()).duplicates() {
        let count = graph.edges.iter().filter(|edge| edge.id == id).count();
        issues.push(ValidationIssue::warning(
            IssueCode::DuplicateEdgeId,
            format!("Edge id \"{}\" is shared by {} edges", id, count),
            None,
        ));
    }
}
