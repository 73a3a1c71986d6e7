use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node inside one flow document. Flow editors emit plain
/// integer ids, unique per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The connection index conventions used by the flow editor.
///
/// A [`Connection`] carries two index fields that disambiguate which slot of
/// each endpoint the edge is attached to. Two of those slots have pipeline
/// meaning and are part of the node-kind contract:
///
/// * `in_index == STDIN` — the edge feeds the consuming node's standard
///   input rather than one of its parameter ports.
/// * `out_index == STDOUT` — the edge taps the producing tool's standard
///   output rather than a declared file output.
///
/// Every other index value addresses an ordinary parameter port and has no
/// effect on stream linking.
pub mod slot {
    /// The stdin slot on a consuming node.
    pub const STDIN: u32 = 1;
    /// The stdout slot on a producing tool node.
    pub const STDOUT: u32 = 4;
}

/// A directed edge from the producing node (`out_id`) to the consuming node
/// (`in_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub out_id: NodeId,
    pub in_id: NodeId,
    pub out_index: u32,
    pub in_index: u32,
}

impl Connection {
    /// True when this edge is attached to the consumer's stdin slot.
    pub fn feeds_stdin(&self) -> bool {
        self.in_index == slot::STDIN
    }

    /// True when this edge is attached to the producer's stdout slot.
    pub fn taps_stdout(&self) -> bool {
        self.out_index == slot::STDOUT
    }
}

/// Declared type of a tool port. The set is closed: the flow editor emits
/// nothing else, and an unknown type is a malformed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    String,
    Int,
    Flag,
    // The editor spells the file type the CWL way.
    #[serde(alias = "File")]
    File,
}

impl PortType {
    /// The CWL spelling of this type. `flag` ports are CWL booleans.
    pub fn cwl_name(&self) -> &'static str {
        match self {
            PortType::String => "string",
            PortType::Int => "int",
            PortType::Flag => "boolean",
            PortType::File => "File",
        }
    }
}

/// A concrete value carried by a port.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PortValue {
    /// The activity rule: a port participates in synthesis only when its
    /// value is present and not falsy (`false`, `0`, `0.0`, `""`).
    pub fn is_truthy(&self) -> bool {
        match self {
            PortValue::Bool(b) => *b,
            PortValue::Int(i) => *i != 0,
            PortValue::Float(f) => *f != 0.0,
            PortValue::Str(s) => !s.is_empty(),
        }
    }

    /// The textual form used for command-line rendering and the
    /// file-vs-scalar classification. Booleans render as an empty token.
    pub fn render(&self) -> String {
        match self {
            PortValue::Bool(_) => String::new(),
            PortValue::Int(i) => i.to_string(),
            PortValue::Float(f) => f.to_string(),
            PortValue::Str(s) => s.clone(),
        }
    }

    /// A value whose textual form contains a dot is treated as a file path.
    pub fn looks_like_file(&self) -> bool {
        matches!(self, PortValue::Str(s) if s.contains('.'))
    }
}

/// A named, typed parameter slot on a tool node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Port {
    pub name: String,
    pub port_type: PortType,
    pub value: Option<PortValue>,
    /// Argument ordering on the synthesized command line.
    pub position: i64,
    pub short_name: Option<String>,
}

impl Port {
    /// Active ports are the only ones that become arguments or CWL inputs.
    pub fn is_active(&self) -> bool {
        self.value.as_ref().is_some_and(PortValue::is_truthy)
    }

    /// Ports whose name contains `arg` render as bare positional values and
    /// get no prefix in their CWL input binding.
    pub fn is_positional(&self) -> bool {
        self.name.contains("arg")
    }
}

/// The command-line tool a [`NodeKind::Tool`] node invokes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub path: String,
    pub ports: Vec<Port>,
}

/// Value-carrier node kinds. Their values are folded into the ports that
/// reference them before the flow document reaches this crate, so
/// normalization removes the carrier nodes themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueKind {
    String,
    Boolean,
}

/// The closed set of node kinds a pipeline is made of.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Streams the named file into the pipeline as its head.
    FileInput { path: String },
    /// Writes the stream it receives to the named file.
    FileOutput { path: String },
    /// Invokes a command-line tool with its active ports as arguments.
    Tool(ToolSpec),
    /// A pure value carrier, pruned during normalization.
    Value(ValueKind),
}

/// A unit of work in the flow graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    /// Number of connections where this node is the consumer. Zero at load
    /// time; recomputed by normalization.
    #[serde(default)]
    pub num_inputs: usize,
}

/// The canonical, format-agnostic flow definition every translation stage
/// operates on. Custom raw formats reach it through
/// [`IntoFlow`](crate::flow::IntoFlow).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl Flow {
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Connections where the given node is the producer.
    pub fn outgoing(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.out_id == id)
    }

    /// Connections where the given node is the consumer.
    pub fn incoming(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections.iter().filter(move |c| c.in_id == id)
    }
}
