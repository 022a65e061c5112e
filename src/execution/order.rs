use crate::graph::{Graph, Node, NodeId, NodeKind};
use ahash::AHashSet;
use std::collections::VecDeque;

/// Picks the node a run starts from: the first `Start` node in insertion order,
/// or the first node overall when the graph has none.
pub fn select_start_node(graph: &Graph) -> Option<&Node> {
    graph
        .nodes_of_kind(NodeKind::Start)
        .next()
        .or_else(|| {
            let fallback = graph.nodes.first();
            if let Some(node) = fallback {
                tracing::warn!(node_id = %node.id, "no start node, falling back to first node");
            }
            fallback
        })
}

/// Computes the visitation order of a run.
///
/// Breadth-first from the start node over outgoing edges. A node may sit in the
/// queue more than once; the visited check happens on dequeue, so a node reached
/// along several paths is placed once, at its first arrival. Nodes that cannot
/// be reached from the start are left out entirely, as are edge targets that
/// name no node.
pub fn execution_order(graph: &Graph) -> Vec<NodeId> {
    let Some(start) = select_start_node(graph) else {
        return Vec::new();
    };

    let adjacency = graph.adjacency();
    let known: AHashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([start.id.as_str()]);
    let mut order = Vec::new();

    while let Some(node_id) = queue.pop_front() {
        if !visited.insert(node_id) {
            continue;
        }
        order.push(node_id.to_string());
        queue.extend(
            adjacency
                .outgoing(node_id)
                .iter()
                .copied()
                .filter(|target| known.contains(target) && !visited.contains(target)),
        );
    }

    order
}
