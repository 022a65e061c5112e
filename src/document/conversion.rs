use crate::error::ConversionError;
use crate::graph::Graph;

/// A trait for foreign workflow formats that can be converted into a keiro `Graph`.
///
/// This is the boundary where editor- or generator-specific shapes are
/// normalized. Everything past it (validation, ordering, execution) only ever
/// sees the canonical `Graph`, no matter where the snapshot came from.
///
/// # Example
///
/// ```rust
/// use keiro::prelude::*;
/// use keiro::error::ConversionError;
///
/// struct Step { name: String, next: Option<String> }
/// struct Pipeline { steps: Vec<Step> }
///
/// impl IntoGraph for Pipeline {
///     fn into_graph(self) -> std::result::Result<Graph, ConversionError> {
///         let mut nodes = Vec::new();
///         let mut edges = Vec::new();
///         for (i, step) in self.steps.into_iter().enumerate() {
///             let kind = if i == 0 { NodeKind::Start } else { NodeKind::Process };
///             if let Some(next) = &step.next {
///                 edges.push(Edge::new(format!("e{}", i), step.name.clone(), next.clone()));
///             }
///             nodes.push(Node::new(step.name.clone(), kind).with_label(step.name));
///         }
///         Ok(Graph::from_parts(nodes, edges))
///     }
/// }
///
/// let pipeline = Pipeline {
///     steps: vec![
///         Step { name: "fetch".into(), next: Some("parse".into()) },
///         Step { name: "parse".into(), next: None },
///     ],
/// };
/// let graph = pipeline.into_graph().unwrap();
/// assert_eq!(execution_order(&graph), vec!["fetch", "parse"]);
/// ```
pub trait IntoGraph {
    /// Consumes the object and converts it into a canonical workflow graph.
    fn into_graph(self) -> Result<Graph, ConversionError>;
}

impl IntoGraph for Graph {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        Ok(self)
    }
}
