use crate::error::GraphError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

mod builder;
mod model;

pub use builder::GraphBuilder;
pub use model::{Edge, Node, NodeId, NodeKind, Position};

/// An immutable snapshot of a workflow: nodes in creation order, edges in
/// insertion order.
///
/// The graph does not police its own contents. Dangling edges and repeated ids
/// are kept as supplied so the validator can report them; every query here
/// fails safely on such input instead of panicking.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Wraps a raw snapshot verbatim.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Targets of every edge leaving `node_id`, in edge insertion order.
    /// Parallel edges yield the same target more than once.
    pub fn outgoing<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.source == node_id)
            .map(|edge| edge.target.as_str())
    }

    /// Looks up a node by id. With repeated ids the first node wins.
    pub fn node_by_id(&self, id: &str) -> Result<&Node, GraphError> {
        self.nodes
            .iter()
            .find(|node| node.id == id)
            .ok_or_else(|| GraphError::NotFound { id: id.to_string() })
    }

    /// All nodes of the given kind, in insertion order.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id == id)
    }

    /// Builds a source -> targets index for repeated `outgoing` queries.
    pub fn adjacency(&self) -> Adjacency<'_> {
        Adjacency::new(self)
    }
}

/// Precomputed outgoing-edge index over a borrowed `Graph`.
pub struct Adjacency<'a> {
    targets: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Adjacency<'a> {
    fn new(graph: &'a Graph) -> Self {
        let mut targets: AHashMap<&'a str, Vec<&'a str>> = AHashMap::new();
        for edge in &graph.edges {
            targets
                .entry(edge.source.as_str())
                .or_default()
                .push(edge.target.as_str());
        }
        Self { targets }
    }

    /// Same contract as `Graph::outgoing`.
    pub fn outgoing(&self, node_id: &str) -> &[&'a str] {
        self.targets.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of edges leaving `node_id`.
    pub fn fan_out(&self, node_id: &str) -> usize {
        self.outgoing(node_id).len()
    }
}
