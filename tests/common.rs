//! Common test utilities for building workflow graphs.
use keiro::prelude::*;

#[allow(dead_code)]
pub fn node(id: &str, kind: NodeKind) -> Node {
    Node::new(id, kind).with_label(id)
}

#[allow(dead_code)]
pub fn edge(id: &str, source: &str, target: &str) -> Edge {
    Edge::new(id, source, target)
}

#[allow(dead_code)]
pub fn ids(order: &[NodeId]) -> Vec<&str> {
    order.iter().map(String::as_str).collect()
}

/// `S -> P -> E`
#[allow(dead_code)]
pub fn create_linear_graph() -> Graph {
    Graph::from_parts(
        vec![
            node("S", NodeKind::Start),
            node("P", NodeKind::Process),
            node("E", NodeKind::End),
        ],
        vec![edge("e1", "S", "P"), edge("e2", "P", "E")],
    )
}

/// `S -> A, S -> B, A -> C, B -> C`
#[allow(dead_code)]
pub fn create_diamond_graph() -> Graph {
    Graph::from_parts(
        vec![
            node("S", NodeKind::Start),
            node("A", NodeKind::Process),
            node("B", NodeKind::Process),
            node("C", NodeKind::End),
        ],
        vec![
            edge("e1", "S", "A"),
            edge("e2", "S", "B"),
            edge("e3", "A", "C"),
            edge("e4", "B", "C"),
        ],
    )
}

/// A structurally valid workflow with one decision:
///
/// `S -> Check`, `Check -(yes)-> Ship -> E`, `Check -(no)-> E`
#[allow(dead_code)]
pub fn create_decision_graph() -> Graph {
    let mut builder = GraphBuilder::new();
    let start = builder.add_node(NodeKind::Start);
    let check = builder.add_labeled_node(NodeKind::Decision, "In stock?");
    let ship = builder.add_labeled_node(NodeKind::Process, "Ship order");
    let end = builder.add_node(NodeKind::End);
    builder.connect(&start, &check);
    builder.connect_via(&check, "yes", &ship, "in");
    builder.connect_via(&check, "no", &end, "in");
    builder.connect(&ship, &end);
    builder.build()
}

/// A workflow as exported by the editor, with node kinds spread over
/// `data.nodeType`, `data.type` and the node's own `type`.
#[allow(dead_code)]
pub const EDITOR_EXPORT_JSON: &str = r##"{
  "nodes": [
    {
      "id": "node_1",
      "type": "custom",
      "position": { "x": 100, "y": 100 },
      "data": {
        "name": "Start",
        "description": "Start description",
        "category": "General",
        "color": "#4caf50",
        "nodeType": "start"
      }
    },
    {
      "id": "node_2",
      "type": "custom",
      "position": { "x": 300, "y": 100 },
      "data": {
        "label": "Review request",
        "name": "Process",
        "category": "General",
        "color": "#2196f3",
        "type": "process"
      }
    },
    {
      "id": "node_3",
      "type": "end",
      "position": { "x": 500, "y": 100 },
      "data": { "name": null, "color": "#f44336" }
    }
  ],
  "edges": [
    { "id": "edge_a", "source": "node_1", "target": "node_2", "type": "default" },
    { "id": "edge_b", "source": "node_2", "target": "node_3", "sourceHandle": "out", "targetHandle": "in" }
  ],
  "version": "1.0",
  "exportedAt": "2024-05-01T12:00:00.000Z"
}"##;
