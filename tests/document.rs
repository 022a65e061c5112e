//! Tests for importing and exporting the editor's workflow documents.
mod common;
use common::*;
use keiro::document::{RawNode, RawNodeData};
use keiro::prelude::*;

#[test]
fn test_editor_export_is_normalized() {
    let document = WorkflowDocument::from_json(EDITOR_EXPORT_JSON).expect("valid document");
    assert_eq!(document.version.as_deref(), Some("1.0"));

    let graph = document.into_graph().expect("convertible document");
    let kinds: Vec<NodeKind> = graph.nodes.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::Start, NodeKind::Process, NodeKind::End]);

    // `label` wins over `name`; a node with neither falls back to its id for display.
    assert_eq!(graph.nodes[0].label, "Start");
    assert_eq!(graph.nodes[1].label, "Review request");
    assert_eq!(graph.nodes[2].display_name(), "node_3");
    assert_eq!(graph.nodes[2].color, "#f44336");
    assert_eq!(graph.nodes[1].position.x, 300.0);

    assert_eq!(graph.edges[1].source_handle.as_deref(), Some("out"));
    assert_eq!(graph.edges[0].target_handle, None);

    assert!(validate(&graph).is_empty());
    assert_eq!(
        execution_order(&graph),
        vec!["node_1", "node_2", "node_3"]
    );
}

#[test]
fn test_kind_resolution_precedence() {
    let raw = RawNode {
        id: "n".to_string(),
        node_type: Some("end".to_string()),
        data: RawNodeData {
            node_type: Some("Decision".to_string()),
            kind: Some("process".to_string()),
            ..RawNodeData::default()
        },
        ..RawNode::default()
    };
    let graph = WorkflowDocument {
        nodes: vec![raw],
        ..WorkflowDocument::default()
    }
    .into_graph()
    .unwrap();
    assert_eq!(graph.nodes[0].kind, NodeKind::Decision);
}

#[test]
fn test_renderer_tag_is_not_a_kind() {
    let json = r#"{ "nodes": [ { "id": "n1", "type": "custom", "data": {} } ], "edges": [] }"#;
    let err = WorkflowDocument::from_json(json)
        .unwrap()
        .into_graph()
        .unwrap_err();
    assert_eq!(
        err,
        ConversionError::MissingKind {
            node_id: "n1".to_string()
        }
    );
}

#[test]
fn test_unknown_kind_is_rejected() {
    let json = r#"{ "nodes": [ { "id": "n1", "data": { "nodeType": "loop" } } ], "edges": [] }"#;
    let err = WorkflowDocument::from_json(json)
        .unwrap()
        .into_graph()
        .unwrap_err();
    assert!(matches!(err, ConversionError::UnknownKind { ref kind, .. } if kind == "loop"));
    assert!(err.to_string().contains("loop"));
}

#[test]
fn test_malformed_json_is_reported() {
    let err = WorkflowDocument::from_json("{ nodes: oops").unwrap_err();
    assert!(matches!(err, ConversionError::JsonParseError(_)));

    // Missing the edges array is not a workflow document either.
    assert!(WorkflowDocument::from_json(r#"{ "nodes": [] }"#).is_err());
}

#[test]
fn test_missing_edge_ids_are_filled() {
    let json = r#"{
        "nodes": [
            { "id": "a", "data": { "nodeType": "start" } },
            { "id": "b", "data": { "nodeType": "end" } }
        ],
        "edges": [ { "source": "a", "target": "b" } ]
    }"#;
    let graph = WorkflowDocument::from_json(json)
        .unwrap()
        .into_graph()
        .unwrap();
    assert_eq!(graph.edges[0].id, "edge_0");
}

#[test]
fn test_export_then_import_preserves_the_graph() {
    let graph = create_decision_graph();
    let document = WorkflowDocument::from_graph(&graph);
    assert_eq!(document.version.as_deref(), Some("1.0"));
    assert_eq!(document.nodes[0].node_type.as_deref(), Some("custom"));
    assert_eq!(document.nodes[1].data.node_type.as_deref(), Some("decision"));

    let json = document.to_json_pretty().unwrap();
    let restored = WorkflowDocument::from_json(&json)
        .unwrap()
        .into_graph()
        .unwrap();
    assert_eq!(restored, graph);
}

#[test]
fn test_graph_converts_to_itself() {
    let graph = create_linear_graph();
    assert_eq!(graph.clone().into_graph(), Ok(graph));
}
