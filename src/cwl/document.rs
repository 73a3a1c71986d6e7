//! Exact typed shapes of the emitted CWL v1.0 documents.
//!
//! Every document is built as the precise nested structure the target
//! format requires and serialized in one pass, so no post-processing of the
//! serializer's output is ever needed. Name-keyed sections use
//! [`serde_yaml::Mapping`] to preserve step and parameter order.

use crate::synth::step::{STREAM_INPUT, StreamLink};
use crate::synth::{InputBinding, Step, WorkflowPlan};
use serde::Serialize;
use serde_yaml::{Mapping, Value};

/// The CWL specification version all documents declare.
pub const CWL_VERSION: &str = "v1.0";
/// Interpreter line prepended to every `.cwl` file.
pub const CWL_SHEBANG: &str = "#!/usr/bin/env cwl-runner";

/// One step-definition file (`class: CommandLineTool`).
#[derive(Debug, Serialize)]
pub struct CommandLineToolDoc {
    #[serde(rename = "cwlVersion")]
    pub cwl_version: &'static str,
    pub class: &'static str,
    #[serde(rename = "baseCommand")]
    pub base_command: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdin: Option<String>,
    pub inputs: Mapping,
    pub outputs: Mapping,
}

/// A single entry in a step file's `inputs` section.
#[derive(Debug, Serialize)]
pub struct InputDecl {
    #[serde(rename = "type")]
    pub cwl_type: &'static str,
    #[serde(rename = "inputBinding", skip_serializing_if = "Option::is_none")]
    pub input_binding: Option<InputBinding>,
}

/// A single entry in a step file's `outputs` section; the only output kind
/// emitted is a captured stdout stream.
#[derive(Debug, Serialize)]
pub struct OutputDecl {
    #[serde(rename = "type")]
    pub cwl_type: &'static str,
}

impl CommandLineToolDoc {
    /// Builds the step file for one synthesized step.
    pub fn from_step(step: &Step) -> Result<Self, serde_yaml::Error> {
        let mut inputs = Mapping::new();
        for input in &step.inputs {
            let decl = InputDecl {
                cwl_type: input.cwl_type,
                input_binding: input.binding.clone(),
            };
            inputs.insert(
                Value::String(input.name.clone()),
                serde_yaml::to_value(&decl)?,
            );
        }

        let mut outputs = Mapping::new();
        for output in step.output_names() {
            let decl = OutputDecl { cwl_type: "stdout" };
            outputs.insert(
                Value::String(output.to_string()),
                serde_yaml::to_value(&decl)?,
            );
        }

        Ok(Self {
            cwl_version: CWL_VERSION,
            class: "CommandLineTool",
            base_command: vec![step.base_command.clone()],
            stdin: step
                .stream_in
                .as_ref()
                .map(|_| format!("$(inputs.{STREAM_INPUT}.path)")),
            inputs,
            outputs,
        })
    }
}

/// The top-level workflow file (`class: Workflow`).
#[derive(Debug, Serialize)]
pub struct WorkflowDoc {
    #[serde(rename = "cwlVersion")]
    pub cwl_version: &'static str,
    pub class: &'static str,
    pub inputs: Mapping,
    pub outputs: Vec<Value>,
    pub steps: Mapping,
}

/// One entry in the workflow file's `steps` section.
#[derive(Debug, Serialize)]
pub struct WorkflowStepDecl {
    pub run: String,
    #[serde(rename = "in")]
    pub inputs: Mapping,
    pub out: Vec<String>,
}

impl WorkflowDoc {
    /// Builds the workflow file: global inputs (every parameter input,
    /// name to type), empty outputs, and the per-step wiring. A step's own
    /// parameters are matched by their `<step>_` name prefix; a stream link
    /// wires `input_stream` to `<producingStep>/<outputName>`.
    pub fn from_plan(plan: &WorkflowPlan) -> Result<Self, serde_yaml::Error> {
        let mut inputs = Mapping::new();
        for step in &plan.steps {
            for input in step.inputs.iter().filter(|i| i.value.is_some()) {
                inputs.insert(
                    Value::String(input.name.clone()),
                    Value::String(input.cwl_type.to_string()),
                );
            }
        }

        let mut steps = Mapping::new();
        for step in &plan.steps {
            let mut wiring = Mapping::new();
            for input in step.inputs.iter().filter(|i| i.value.is_some()) {
                wiring.insert(
                    Value::String(input.name.clone()),
                    Value::String(input.name.clone()),
                );
            }
            if let Some(link) = &step.stream_in {
                wiring.insert(
                    Value::String(STREAM_INPUT.to_string()),
                    Value::String(StreamLink::reference(link)),
                );
            }
            let decl = WorkflowStepDecl {
                run: format!("{}.cwl", step.name),
                inputs: wiring,
                out: step.output_names().iter().map(|o| o.to_string()).collect(),
            };
            steps.insert(
                Value::String(step.name.clone()),
                serde_yaml::to_value(&decl)?,
            );
        }

        Ok(Self {
            cwl_version: CWL_VERSION,
            class: "Workflow",
            inputs,
            outputs: Vec::new(),
            steps,
        })
    }
}

/// The consolidated parameter file: every step input's concrete value,
/// keyed by constructed name, in step order.
pub fn params_document(plan: &WorkflowPlan) -> Result<Mapping, serde_yaml::Error> {
    let mut params = Mapping::new();
    for (name, value) in &plan.parameters {
        params.insert(Value::String(name.clone()), serde_yaml::to_value(value)?);
    }
    Ok(params)
}
