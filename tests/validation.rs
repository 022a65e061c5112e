//! Tests for structural workflow validation.
mod common;
use common::*;
use keiro::prelude::*;

fn codes(report: &ValidationReport) -> Vec<IssueCode> {
    report.issues().iter().map(|issue| issue.code).collect()
}

#[test]
fn test_well_formed_graphs_produce_no_issues() {
    for graph in [
        create_linear_graph(),
        create_diamond_graph(),
        create_decision_graph(),
    ] {
        let report = validate(&graph);
        assert!(report.is_empty(), "unexpected issues: {:?}", report);
        assert!(!report.has_errors());
    }
}

#[test]
fn test_missing_start_is_the_first_issue() {
    let graph = Graph::from_parts(
        vec![node("P", NodeKind::Process), node("E", NodeKind::End)],
        vec![edge("e1", "P", "E")],
    );
    let report = validate(&graph);
    let first = &report.issues()[0];
    assert_eq!(first.code, IssueCode::NoStartNode);
    assert_eq!(first.severity, Severity::Error);
    assert!(first.message.contains("No start node"));
    assert_eq!(report.len(), 1);
}

#[test]
fn test_multiple_start_nodes() {
    let graph = Graph::from_parts(
        vec![
            node("S1", NodeKind::Start),
            node("S2", NodeKind::Start),
            node("E", NodeKind::End),
        ],
        vec![edge("e1", "S1", "E"), edge("e2", "S2", "E")],
    );
    assert_eq!(codes(&validate(&graph)), vec![IssueCode::MultipleStartNodes]);
}

#[test]
fn test_multiple_end_nodes_are_legal() {
    let graph = Graph::from_parts(
        vec![
            node("S", NodeKind::Start),
            node("D", NodeKind::Decision),
            node("E1", NodeKind::End),
            node("E2", NodeKind::End),
        ],
        vec![
            edge("e1", "S", "D"),
            edge("e2", "D", "E1"),
            edge("e3", "D", "E2"),
        ],
    );
    assert!(validate(&graph).is_empty());
}

#[test]
fn test_disconnected_node_reported_once_by_label() {
    let mut graph = create_linear_graph();
    graph
        .nodes
        .push(Node::new("D", NodeKind::Process).with_label("Archive"));

    let report = validate(&graph);
    assert_eq!(codes(&report), vec![IssueCode::DisconnectedNode]);
    let issue = &report.issues()[0];
    assert_eq!(issue.node_id.as_deref(), Some("D"));
    assert!(issue.message.contains("\"Archive\""));
}

#[test]
fn test_disconnected_node_without_label_uses_id() {
    let mut graph = create_linear_graph();
    graph.nodes.push(Node::new("node_42", NodeKind::End));

    let report = validate(&graph);
    assert_eq!(report.len(), 1);
    assert!(report.issues()[0].message.contains("\"node_42\""));
}

#[test]
fn test_lonely_start_node_is_exempt_from_connectivity() {
    let graph = Graph::from_parts(
        vec![node("S", NodeKind::Start), node("E", NodeKind::End)],
        vec![],
    );
    let report = validate(&graph);
    // Only the end node is disconnected; the start node is never reported.
    assert_eq!(codes(&report), vec![IssueCode::DisconnectedNode]);
    assert_eq!(report.issues()[0].node_id.as_deref(), Some("E"));
}

#[test]
fn test_decision_fan_out_counts() {
    let graph = Graph::from_parts(
        vec![
            node("S", NodeKind::Start),
            node("D1", NodeKind::Decision),
            node("D2", NodeKind::Decision),
            node("E", NodeKind::End),
        ],
        vec![
            edge("e1", "S", "D1"),
            edge("e2", "D1", "D2"),
            edge("e3", "D2", "E"),
            edge("e4", "D2", "E"),
            edge("e5", "D2", "S"),
        ],
    );
    let report = validate(&graph);
    assert_eq!(
        codes(&report),
        vec![IssueCode::DecisionFanOut, IssueCode::DecisionFanOut]
    );
    assert_eq!(report.issues()[0].node_id.as_deref(), Some("D1"));
    assert!(report.issues()[0].message.contains("currently has 1"));
    assert_eq!(report.issues()[1].node_id.as_deref(), Some("D2"));
    assert!(report.issues()[1].message.contains("currently has 3"));
}

#[test]
fn test_checks_run_in_fixed_order_without_short_circuit() {
    let graph = Graph::from_parts(
        vec![
            node("D", NodeKind::Decision),
            node("P", NodeKind::Process),
            node("Q", NodeKind::Process),
        ],
        vec![edge("e1", "P", "D")],
    );
    let report = validate(&graph);
    assert_eq!(
        codes(&report),
        vec![
            IssueCode::NoStartNode,
            IssueCode::NoEndNode,
            IssueCode::DisconnectedNode,
            IssueCode::DecisionFanOut,
        ]
    );
    assert_eq!(report.issues()[2].node_id.as_deref(), Some("Q"));
}

#[test]
fn test_dangling_edges_are_errors() {
    let mut graph = create_linear_graph();
    graph.edges.push(edge("e9", "P", "ghost"));
    graph.edges.push(edge("e10", "void", "null"));

    let report = validate(&graph);
    assert_eq!(
        codes(&report),
        vec![IssueCode::DanglingEdge, IssueCode::DanglingEdge]
    );
    assert!(report.issues()[0].message.contains("target \"ghost\""));
    let both = &report.issues()[1].message;
    assert!(both.contains("source \"void\" and target \"null\""));
}

#[test]
fn test_duplicate_ids() {
    let mut graph = create_linear_graph();
    graph.nodes.push(node("P", NodeKind::Process));
    graph.edges.push(edge("e1", "S", "E"));

    let report = validate(&graph);
    assert_eq!(
        codes(&report),
        vec![IssueCode::DuplicateNodeId, IssueCode::DuplicateEdgeId]
    );
    assert!(report.has_errors());
    assert_eq!(report.errors().count(), 1);
    assert_eq!(report.warnings().count(), 1);
    assert_eq!(report.issues()[1].severity, Severity::Warning);
}

#[test]
fn test_validation_is_deterministic() {
    let graph = Graph::from_parts(
        vec![
            node("A", NodeKind::Decision),
            node("B", NodeKind::Process),
            node("C", NodeKind::Start),
            node("D", NodeKind::Start),
        ],
        vec![edge("e1", "A", "missing")],
    );
    let snapshot = graph.clone();
    let first = validate(&graph);
    let second = validate(&graph);
    assert_eq!(first, second);
    assert_eq!(graph, snapshot);
}

#[test]
fn test_issue_display_and_serialization() {
    let graph = Graph::from_parts(vec![node("S", NodeKind::Start)], vec![]);
    let report = validate(&graph);
    let issue = &report.issues()[0];
    assert_eq!(
        issue.to_string(),
        "error: No end node found. Add an end node to complete the workflow."
    );

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json[0]["severity"], "error");
    assert_eq!(json[0]["code"], "no-end-node");
    assert!(json[0].get("nodeId").is_none());
}
