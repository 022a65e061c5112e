//! The editor's JSON exchange format.
//!
//! Workflows are exported and imported as `{ nodes, edges, version, exportedAt }`
//! documents in which node kinds live in loosely specified places. This module
//! maps that shape onto the canonical [`Graph`] and back.

use crate::error::ConversionError;
use crate::graph::{Edge, Graph, Node, NodeKind, Position};
use serde::{Deserialize, Serialize};

mod conversion;

pub use conversion::IntoGraph;

/// Format version written by `WorkflowDocument::from_graph`.
pub const DOCUMENT_VERSION: &str = "1.0";

/// Renderer tag the editor puts in a node's `type`. It never names a node kind.
const RENDERER_NODE_TYPE: &str = "custom";

/// A workflow as exported by the editor or returned by a generator service.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDocument {
    pub nodes: Vec<RawNode>,
    pub edges: Vec<RawEdge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub data: RawNodeData,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawNodeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawEdge {
    #[serde(default)]
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl WorkflowDocument {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    /// Exports a graph in the editor's format.
    pub fn from_graph(graph: &Graph) -> Self {
        let nodes = graph
            .nodes
            .iter()
            .map(|node| RawNode {
                id: node.id.clone(),
                node_type: Some(RENDERER_NODE_TYPE.to_string()),
                position: node.position,
                data: RawNodeData {
                    label: Some(node.label.clone()),
                    name: None,
                    description: Some(node.description.clone()),
                    category: Some(node.category.clone()),
                    color: Some(node.color.clone()),
                    node_type: Some(node.kind.as_str().to_string()),
                    kind: None,
                },
            })
            .collect();

        let edges = graph
            .edges
            .iter()
            .map(|edge| RawEdge {
                id: edge.id.clone(),
                source: edge.source.clone(),
                target: edge.target.clone(),
                source_handle: edge.source_handle.clone(),
                target_handle: edge.target_handle.clone(),
            })
            .collect();

        Self {
            nodes,
            edges,
            version: Some(DOCUMENT_VERSION.to_string()),
            exported_at: None,
        }
    }
}

impl RawNode {
    /// Resolves the node kind from the first non-empty of `data.nodeType`,
    /// `data.type` and the node's own `type`.
    fn resolve_kind(&self) -> Result<NodeKind, ConversionError> {
        let declared = [
            self.data.node_type.as_deref(),
            self.data.kind.as_deref(),
            self.node_type
                .as_deref()
                .filter(|tag| !tag.eq_ignore_ascii_case(RENDERER_NODE_TYPE)),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty());

        let Some(name) = declared else {
            return Err(ConversionError::MissingKind {
                node_id: self.id.clone(),
            });
        };
        NodeKind::parse(name).ok_or_else(|| ConversionError::UnknownKind {
            node_id: self.id.clone(),
            kind: name.to_string(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl IntoGraph for WorkflowDocument {
    fn into_graph(self) -> Result<Graph, ConversionError> {
        let nodes = self
            .nodes
            .into_iter()
            .map(|raw| -> Result<Node, ConversionError> {
                let kind = raw.resolve_kind()?;
                let data = raw.data;
                Ok(Node {
                    id: raw.id,
                    kind,
                    label: non_empty(data.label)
                        .or_else(|| non_empty(data.name))
                        .unwrap_or_default(),
                    description: data.description.unwrap_or_default(),
                    category: data.category.unwrap_or_default(),
                    color: data.color.unwrap_or_default(),
                    position: raw.position,
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, raw)| Edge {
                id: if raw.id.is_empty() {
                    format!("edge_{}", index)
                } else {
                    raw.id
                },
                source: raw.source,
                target: raw.target,
                source_handle: raw.source_handle,
                target_handle: raw.target_handle,
            })
            .collect();

        Ok(Graph::from_parts(nodes, edges))
    }
}
