use thiserror::Error;

/// Errors raised by lookups against a workflow `Graph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{id}' not found in the workflow graph")]
    NotFound { id: String },
}

/// Errors that prevent a workflow run from starting.
///
/// Cancellation is not listed here: a cancelled run is a normal outcome and is
/// reported through `RunOutcome::Cancelled`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("Workflow has no nodes to execute")]
    EmptyWorkflow,
}

/// Errors that can occur when converting a foreign document into a keiro `Graph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Node '{node_id}' does not declare a node kind")]
    MissingKind { node_id: String },

    #[error("Node '{node_id}' has an unknown node kind: '{kind}'")]
    UnknownKind { node_id: String, kind: String },
}

/// Errors reported by the key-value persistence collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Stored value under '{key}' is not valid workflow JSON: {message}")]
    Malformed { key: String, message: String },

    #[error("Stored workflow could not be converted: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Failed to serialize workflow for '{key}': {message}")]
    Serialize { key: String, message: String },

    #[error("Storage backend failure: {0}")]
    Backend(String),
}
