use crate::flow::NodeId;
use thiserror::Error;

/// Errors that can occur while loading or converting a flow document.
///
/// All of these indicate malformed input and are raised before any
/// file-system side effect takes place.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Failed to parse flow JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Failed to read flow file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid custom flow data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while linearizing a normalized flow graph.
///
/// These are distinct from [`FlowError`]: the document was well-formed, but
/// its topology is not the single directed path the pipeline model requires.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinearizeError {
    #[error("Flow has no entry point: every node has at least one incoming connection")]
    NoEntryPoint,

    #[error("Flow has {count} entry points with no incoming connections; exactly one is required")]
    MultipleEntryPoints { count: usize },

    #[error(
        "Node '{node_id}' has {count} outgoing connections; branching pipelines are not supported"
    )]
    BranchingNode { node_id: NodeId, count: usize },

    #[error(
        "Pipeline is disconnected or malformed: no outgoing connection from node '{node_id}' after placing {placed} of {total} nodes"
    )]
    Disconnected {
        node_id: NodeId,
        placed: usize,
        total: usize,
    },

    #[error(
        "Connection from node '{out_id}' points at node '{in_id}', which is not in the node set"
    )]
    DanglingConnection { out_id: NodeId, in_id: NodeId },

    #[error("Connection into node '{node_id}' revisits a node already placed; the flow contains a cycle")]
    CycleDetected { node_id: NodeId },
}

/// Errors that can occur while writing the workflow artifact to disk.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Failed to serialize workflow document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Could not write artifact file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors surfaced by the run-status record and the delegation front ends.
///
/// Failures of the delegated execution itself are never represented here:
/// they are logged and recorded as [`RunState::Error`](crate::engine::RunState)
/// at the outermost boundary instead of propagating.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Could not persist run status to '{path}': {source}")]
    StatusWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read run status from '{path}': {source}")]
    StatusRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Run status file '{path}' is not valid JSON: {source}")]
    StatusParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not serialize run status record for '{path}': {source}")]
    StatusEncode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error(transparent)]
    Linearize(#[from] LinearizeError),
}
