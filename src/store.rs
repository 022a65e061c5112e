//! Persistence seam for workflow snapshots.
//!
//! The editor keeps its graph in an external key-value store under two
//! well-known keys, one holding the node array and one the edge array, both in
//! the editor's own format (see [`crate::document`]). The core never depends on
//! a particular backend; it only reads and writes snapshots through
//! [`KeyValueStore`].

use crate::document::{IntoGraph, RawEdge, RawNode, WorkflowDocument};
use crate::error::StoreError;
use crate::graph::Graph;
use ahash::AHashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key holding the JSON array of nodes.
pub const NODES_KEY: &str = "workflowNodes";
/// Key holding the JSON array of edges.
pub const EDGES_KEY: &str = "workflowEdges";

/// A string-keyed, string-valued store such as browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// An in-process `KeyValueStore`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: AHashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Writes both halves of the snapshot as editor-format arrays.
pub fn save_graph(store: &mut impl KeyValueStore, graph: &Graph) -> Result<(), StoreError> {
    let document = WorkflowDocument::from_graph(graph);
    store.set(NODES_KEY, encode(NODES_KEY, &document.nodes)?)?;
    store.set(EDGES_KEY, encode(EDGES_KEY, &document.edges)?)?;
    Ok(())
}

/// Reads a snapshot back. A missing key reads as an empty sequence.
pub fn load_graph(store: &impl KeyValueStore) -> Result<Graph, StoreError> {
    let nodes: Vec<RawNode> = decode(NODES_KEY, store.get(NODES_KEY)?)?;
    let edges: Vec<RawEdge> = decode(EDGES_KEY, store.get(EDGES_KEY)?)?;
    let document = WorkflowDocument {
        nodes,
        edges,
        ..WorkflowDocument::default()
    };
    Ok(document.into_graph()?)
}

pub fn clear_graph(store: &mut impl KeyValueStore) -> Result<(), StoreError> {
    store.remove(NODES_KEY)?;
    store.remove(EDGES_KEY)
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        message: e.to_string(),
    })
}

fn decode<T: DeserializeOwned>(key: &str, raw: Option<String>) -> Result<Vec<T>, StoreError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };
    serde_json::from_str(&raw).map_err(|e| StoreError::Malformed {
        key: key.to_string(),
        message: e.to_string(),
    })
}
