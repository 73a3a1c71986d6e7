//! The structured synthesis dialect: one [`Step`] per node, parameter
//! values collected into a flat set keyed by constructed input names, and
//! stdin/stdout chaining expressed as declarative stream links instead of
//! shell pipes.

use super::{FileParam, InputBinding, cwl_type_name};
use crate::flow::{Flow, Node, NodeId, NodeKind, PortType, PortValue, ToolSpec};
use ahash::AHashSet;
use itertools::Itertools;
use serde::Serialize;

/// Step-local id of the input that receives a stream-linked predecessor
/// output.
pub const STREAM_INPUT: &str = "input_stream";
/// Name of the captured-stdout output a producing step declares.
pub const STDOUT_OUTPUT: &str = "out";

/// A concrete parameter value as written to the parameter file: either a
/// CWL `File` record or a plain scalar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    File(FileParam),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl ParamValue {
    fn file(path: &str) -> Self {
        ParamValue::File(FileParam::new(expand_user(path)))
    }
}

impl From<&PortValue> for ParamValue {
    fn from(value: &PortValue) -> Self {
        match value {
            PortValue::Bool(b) => ParamValue::Bool(*b),
            PortValue::Int(i) => ParamValue::Int(*i),
            PortValue::Float(f) => ParamValue::Float(*f),
            PortValue::Str(s) => ParamValue::Str(s.clone()),
        }
    }
}

/// A typed input slot of a synthesized step.
///
/// `name` is the constructed, globally unique id (`<step>_<port>`); inputs
/// with a `value` appear in the parameter file, the valueless stream input
/// is wired from the producing step instead.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInput {
    pub name: String,
    pub cwl_type: &'static str,
    pub binding: Option<InputBinding>,
    pub value: Option<ParamValue>,
}

/// A declarative stdin wire: this step reads the named output of an earlier
/// step.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamLink {
    pub source_step: String,
    pub output_name: String,
}

impl StreamLink {
    /// The `<producingStep>/<outputName>` reference used in the workflow
    /// file's step wiring.
    pub fn reference(&self) -> String {
        format!("{}/{}", self.source_step, self.output_name)
    }
}

/// The synthesized, serializable unit of work corresponding to one node.
/// Built once during synthesis and never mutated after emission begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub name: String,
    pub base_command: String,
    pub inputs: Vec<StepInput>,
    pub stream_in: Option<StreamLink>,
    pub captures_stdout: bool,
}

impl Step {
    /// The outputs this step declares: just the captured stdout, if any.
    pub fn output_names(&self) -> Vec<&'static str> {
        if self.captures_stdout {
            vec![STDOUT_OUTPUT]
        } else {
            Vec::new()
        }
    }
}

/// The complete structured translation result: ordered steps plus the
/// flattened workflow parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowPlan {
    pub steps: Vec<Step>,
    pub parameters: Vec<(String, ParamValue)>,
}

impl WorkflowPlan {
    /// The workflow base name: all step names joined with `-`.
    pub fn workflow_name(&self) -> String {
        self.steps.iter().map(|s| s.name.as_str()).join("-")
    }
}

/// Expands a leading `~` to the user's home directory. One-directional: the
/// parameter file always carries absolute paths.
pub fn expand_user(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if rest.is_empty() || rest.starts_with('/') {
            if let Some(home) = dirs::home_dir() {
                return format!("{}{}", home.display(), rest);
            }
        }
    }
    path.to_string()
}

/// The output of the step most recently marked capturable, waiting for a
/// consumer. At most one exists at a time; it is threaded through the
/// synthesis loop and cleared on consumption.
struct PendingProducer {
    node_id: NodeId,
    step_name: String,
}

/// Synthesizes the structured step plan from a linearized flow.
pub struct Synthesizer<'a> {
    flow: &'a Flow,
}

impl<'a> Synthesizer<'a> {
    pub fn new(flow: &'a Flow) -> Self {
        Self { flow }
    }

    /// Builds one [`Step`] per ordered node and collects every valued input
    /// into the parameter set, in step order.
    pub fn structured(&self, ordered: &[&Node]) -> WorkflowPlan {
        let mut steps: Vec<Step> = Vec::new();
        let mut parameters: Vec<(String, ParamValue)> = Vec::new();
        let mut used_names: AHashSet<String> = AHashSet::new();
        let mut pending: Option<PendingProducer> = None;

        for node in ordered {
            let name = self.unique_step_name(node, &mut used_names);
            let mut step = match &node.kind {
                NodeKind::FileInput { path } => self.file_input_step(node, name, path),
                NodeKind::FileOutput { path } => self.file_output_step(name, path),
                NodeKind::Tool(tool) => self.tool_step(node, name, tool),
                // Pruned during normalization; nothing to synthesize.
                NodeKind::Value(_) => continue,
            };

            // Claim the pending producer only when a connection actually
            // wires its stdout slot to this node's stdin slot.
            if let Some(producer) = pending.take() {
                let linked = self
                    .flow
                    .incoming(node.id)
                    .any(|c| c.out_id == producer.node_id && c.feeds_stdin());
                if linked {
                    step.inputs.push(StepInput {
                        name: STREAM_INPUT.to_string(),
                        cwl_type: PortType::File.cwl_name(),
                        binding: None,
                        value: None,
                    });
                    step.stream_in = Some(StreamLink {
                        source_step: producer.step_name,
                        output_name: STDOUT_OUTPUT.to_string(),
                    });
                } else {
                    pending = Some(producer);
                }
            }

            if step.captures_stdout {
                pending = Some(PendingProducer {
                    node_id: node.id,
                    step_name: step.name.clone(),
                });
            }

            for input in &step.inputs {
                if let Some(value) = &input.value {
                    parameters.push((input.name.clone(), value.clone()));
                }
            }
            steps.push(step);
        }

        WorkflowPlan { steps, parameters }
    }

    /// Step names come from the node kind (`cat`, `print`, or the tool's
    /// executable name). Two tools sharing an executable would otherwise
    /// emit to the same step file, so later occurrences get a node-id
    /// suffix.
    fn unique_step_name(&self, node: &Node, used: &mut AHashSet<String>) -> String {
        let base = match &node.kind {
            NodeKind::FileInput { .. } => "cat".to_string(),
            NodeKind::FileOutput { .. } => "print".to_string(),
            NodeKind::Tool(tool) => tool
                .path
                .rsplit('/')
                .next()
                .unwrap_or(tool.path.as_str())
                .to_string(),
            NodeKind::Value(_) => "value".to_string(),
        };
        let name = if used.contains(&base) {
            format!("{base}_{}", node.id)
        } else {
            base
        };
        used.insert(name.clone());
        name
    }

    /// The pipeline head: streams the configured file and exposes its
    /// stdout to the next step.
    fn file_input_step(&self, node: &Node, name: String, path: &str) -> Step {
        let captures_stdout = self.flow.outgoing(node.id).next().is_some();
        let input = StepInput {
            name: format!("{name}_path"),
            cwl_type: PortType::File.cwl_name(),
            binding: Some(InputBinding {
                position: 0,
                prefix: None,
            }),
            value: Some(ParamValue::file(path)),
        };
        Step {
            name,
            base_command: "cat".to_string(),
            inputs: vec![input],
            stream_in: None,
            captures_stdout,
        }
    }

    /// The pipeline tail: writes the stream it receives to the configured
    /// destination path.
    fn file_output_step(&self, name: String, path: &str) -> Step {
        let input = StepInput {
            name: format!("{name}_outputFilePath"),
            cwl_type: PortType::File.cwl_name(),
            binding: Some(InputBinding {
                position: 0,
                prefix: None,
            }),
            value: Some(ParamValue::file(path)),
        };
        Step {
            name,
            base_command: ">".to_string(),
            inputs: vec![input],
            stream_in: None,
            captures_stdout: false,
        }
    }

    /// A tool invocation: active ports become typed inputs ordered by
    /// position. Values containing a dot are reclassified as `File` (with
    /// `~` expansion); `arg`-named ports bind without a prefix, everything
    /// else gets `-<shortName>` or `-<name>`.
    fn tool_step(&self, node: &Node, name: String, tool: &ToolSpec) -> Step {
        let mut inputs = Vec::new();
        for port in tool
            .ports
            .iter()
            .filter(|p| p.is_active())
            .sorted_by_key(|p| p.position)
        {
            // `is_active` guarantees a value is present.
            let Some(value) = port.value.as_ref() else {
                continue;
            };
            let is_file = value.looks_like_file();
            let prefix = if port.is_positional() {
                None
            } else {
                Some(format!(
                    "-{}",
                    port.short_name.as_deref().unwrap_or(&port.name)
                ))
            };
            inputs.push(StepInput {
                name: format!("{name}_{}", port.name),
                cwl_type: cwl_type_name(port.port_type, is_file),
                binding: Some(InputBinding {
                    position: port.position,
                    prefix,
                }),
                value: Some(if is_file {
                    ParamValue::file(&value.render())
                } else {
                    ParamValue::from(value)
                }),
            });
        }

        let captures_stdout = self.flow.outgoing(node.id).any(|c| c.taps_stdout());
        Step {
            name,
            base_command: tool.path.clone(),
            inputs,
            stream_in: None,
            captures_stdout,
        }
    }
}
