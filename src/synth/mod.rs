//! Command/step synthesis: turns the linearized node chain into either a
//! flat shell-command sequence or a structured, declaratively wired step
//! plan.

pub mod command;
pub mod step;

pub use command::{flat_commands, pipeline_string};
pub use step::{
    ParamValue, Step, StepInput, StreamLink, Synthesizer, WorkflowPlan, expand_user,
};

use crate::flow::PortType;
use serde::Serialize;

/// The CWL `File` record shape used for file-typed parameter values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileParam {
    pub class: &'static str,
    pub path: String,
}

impl FileParam {
    pub fn new(path: String) -> Self {
        Self {
            class: "File",
            path,
        }
    }
}

/// The argument binding of a step input: its position on the command line
/// and an optional `-x`/`-name` prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputBinding {
    pub position: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

/// Maps a declared port type (plus the file reclassification) onto its CWL
/// spelling.
pub(crate) fn cwl_type_name(port_type: PortType, is_file: bool) -> &'static str {
    if is_file {
        PortType::File.cwl_name()
    } else {
        port_type.cwl_name()
    }
}
