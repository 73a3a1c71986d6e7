//! Artifact emission: renders every CWL document in memory first, then
//! writes the whole set to the output directory. An error during rendering
//! therefore never leaves partial files behind.

use super::document::{CWL_SHEBANG, CommandLineToolDoc, WorkflowDoc, params_document};
use crate::error::EmitError;
use crate::synth::WorkflowPlan;
use std::fs;
use std::path::{Path, PathBuf};

/// Locations of the emitted artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub workflow_file: PathBuf,
    pub params_file: PathBuf,
    pub step_files: Vec<PathBuf>,
}

/// Writes the structured workflow artifact for a synthesized plan.
pub struct Emitter {
    output_dir: PathBuf,
}

impl Emitter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Emits one `<step>.cwl` per step, `<name>-params.yml`, and
    /// `<name>-workflow.cwl`, where `<name>` is the plan's workflow name.
    pub fn emit(&self, plan: &WorkflowPlan) -> Result<ArtifactPaths, EmitError> {
        let workflow_name = plan.workflow_name();
        let mut rendered: Vec<(PathBuf, String)> = Vec::new();
        let mut step_files = Vec::new();

        for step in &plan.steps {
            let doc = CommandLineToolDoc::from_step(step)?;
            let path = self.output_dir.join(format!("{}.cwl", step.name));
            rendered.push((path.clone(), with_shebang(&serde_yaml::to_string(&doc)?)));
            step_files.push(path);
        }

        let params_file = self.output_dir.join(format!("{workflow_name}-params.yml"));
        let params = params_document(plan)?;
        rendered.push((params_file.clone(), serde_yaml::to_string(&params)?));

        let workflow_file = self
            .output_dir
            .join(format!("{workflow_name}-workflow.cwl"));
        let workflow = WorkflowDoc::from_plan(plan)?;
        rendered.push((
            workflow_file.clone(),
            with_shebang(&serde_yaml::to_string(&workflow)?),
        ));

        // Everything serialized cleanly; only now touch the file system.
        fs::create_dir_all(&self.output_dir).map_err(|e| EmitError::Io {
            path: self.output_dir.display().to_string(),
            source: e,
        })?;
        for (path, content) in rendered {
            fs::write(&path, content).map_err(|e| EmitError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
        }

        Ok(ArtifactPaths {
            workflow_file,
            params_file,
            step_files,
        })
    }
}

fn with_shebang(yaml: &str) -> String {
    format!("{CWL_SHEBANG}\n\n{yaml}")
}
