//! Raw serde model of the `.flow` JSON document.
//!
//! These structs mirror the editor's on-disk format exactly and are only
//! used as a staging area: [`FlowDocument::into_flow`] converts them into
//! the canonical [`Flow`] model. The editor also stores a per-node
//! `position` object for canvas layout; it is presentation-only and is not
//! declared here, so deserialization drops it.

use super::conversion::IntoFlow;
use super::model::{
    Connection, Flow, Node, NodeId, NodeKind, Port, PortType, PortValue, ToolSpec, ValueKind,
};
use crate::error::FlowError;
use serde::Deserialize;

/// Top-level shape of a `.flow` file.
#[derive(Debug, Deserialize)]
pub struct FlowDocument {
    pub nodes: Vec<RawNode>,
    pub connections: Vec<RawConnection>,
}

#[derive(Debug, Deserialize)]
pub struct RawNode {
    pub id: i64,
    pub model: RawNodeModel,
}

/// Kind-specific node payload, tagged by the editor's `name` field.
/// An unrecognized kind fails deserialization; the kind set is closed.
#[derive(Debug, Deserialize)]
#[serde(tag = "name")]
pub enum RawNodeModel {
    FileInput {
        path: String,
    },
    FileOutput {
        #[serde(alias = "outputFilePath")]
        output_file_path: String,
    },
    ToolNode {
        tool: RawTool,
    },
    String {
        #[serde(default)]
        value: Option<String>,
    },
    Boolean {
        #[serde(default)]
        value: Option<bool>,
    },
}

#[derive(Debug, Deserialize)]
pub struct RawTool {
    pub path: String,
    pub ports: Vec<RawPort>,
}

#[derive(Debug, Deserialize)]
pub struct RawPort {
    pub name: String,
    #[serde(rename = "type")]
    pub port_type: PortType,
    #[serde(default)]
    pub value: Option<PortValue>,
    #[serde(default)]
    pub position: i64,
    #[serde(default, alias = "shortName")]
    pub short_name: Option<String>,
    /// The port's slot index on its node. Slot semantics live on the
    /// connection indices, so the canonical model does not carry this.
    #[serde(default)]
    pub port_index: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawConnection {
    pub in_id: i64,
    pub out_id: i64,
    #[serde(default)]
    pub in_index: u32,
    #[serde(default)]
    pub out_index: u32,
}

impl IntoFlow for FlowDocument {
    fn into_flow(self) -> Result<Flow, FlowError> {
        let mut nodes = Vec::with_capacity(self.nodes.len());
        for raw in self.nodes {
            let kind = match raw.model {
                RawNodeModel::FileInput { path } => NodeKind::FileInput { path },
                RawNodeModel::FileOutput { output_file_path } => NodeKind::FileOutput {
                    path: output_file_path,
                },
                RawNodeModel::ToolNode { tool } => {
                    let path = tool.path.trim().to_string();
                    if path.is_empty() {
                        return Err(FlowError::ValidationError(format!(
                            "ToolNode '{}' has an empty command path",
                            raw.id
                        )));
                    }
                    NodeKind::Tool(ToolSpec {
                        path,
                        ports: tool.ports.into_iter().map(Port::from).collect(),
                    })
                }
                RawNodeModel::String { .. } => NodeKind::Value(ValueKind::String),
                RawNodeModel::Boolean { .. } => NodeKind::Value(ValueKind::Boolean),
            };
            nodes.push(Node {
                id: NodeId(raw.id),
                kind,
                num_inputs: 0,
            });
        }

        let connections = self
            .connections
            .into_iter()
            .map(|raw| Connection {
                out_id: NodeId(raw.out_id),
                in_id: NodeId(raw.in_id),
                out_index: raw.out_index,
                in_index: raw.in_index,
            })
            .collect();

        Ok(Flow { nodes, connections })
    }
}

impl From<RawPort> for Port {
    fn from(raw: RawPort) -> Self {
        Port {
            name: raw.name,
            port_type: raw.port_type,
            value: raw.value,
            position: raw.position,
            short_name: raw.short_name,
        }
    }
}
