use super::{Edge, Graph, Node, NodeId, NodeKind, Position};
use itertools::Itertools;

/// Horizontal spacing between consecutively added nodes on the canvas.
const NODE_SPACING: f64 = 200.0;

/// Assembles a `Graph` programmatically.
///
/// Ids are handed out from monotonically increasing counters, so an id is
/// never reused within one builder even if the caller discards nodes.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node: u64,
    next_edge: u64,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with the kind's default label and palette.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        self.add_labeled_node(kind, kind.default_label())
    }

    pub fn add_labeled_node(&mut self, kind: NodeKind, label: &str) -> NodeId {
        let id = format!("node_{}", self.next_node);
        let position = Position {
            x: 100.0 + NODE_SPACING * self.next_node as f64,
            y: 100.0,
        };
        self.next_node += 1;

        self.nodes.push(Node {
            id: id.clone(),
            kind,
            label: label.to_string(),
            description: format!("{} description", kind.default_label()),
            category: "General".to_string(),
            color: kind.default_color().to_string(),
            position,
        });
        id
    }

    /// Connects two nodes and returns the new edge id. Endpoints are not checked.
    pub fn connect(&mut self, source: &str, target: &str) -> String {
        let id = format!("edge_{}", self.next_edge);
        self.next_edge += 1;
        self.edges.push(Edge::new(id.clone(), source, target));
        id
    }

    /// Connects two nodes through named handles (e.g. the yes/no outputs of a decision).
    pub fn connect_via(
        &mut self,
        source: &str,
        source_handle: &str,
        target: &str,
        target_handle: &str,
    ) -> String {
        let id = self.connect(source, target);
        if let Some(edge) = self.edges.last_mut() {
            edge.source_handle = Some(source_handle.to_string());
            edge.target_handle = Some(target_handle.to_string());
        }
        id
    }

    /// Chains `connect` along `path`: `a -> b -> c`.
    pub fn chain(&mut self, path: &[&str]) -> &mut Self {
        for (source, target) in path.iter().tuple_windows() {
            self.connect(source, target);
        }
        self
    }

    pub fn build(self) -> Graph {
        Graph::from_parts(self.nodes, self.edges)
    }
}
