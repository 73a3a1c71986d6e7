//! The CWL delegation front end: emits the structured workflow artifact and
//! hands it to an external cwl-runner binary as a blocking subprocess.

use super::status::{RunState, WorkflowStatus};
use crate::cwl::{ArtifactPaths, Emitter};
use crate::error::EngineError;
use crate::flow::Flow;
use crate::graph::{linearize, normalize};
use crate::synth::Synthesizer;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Drives one flow through translation, emission, and delegated execution.
pub struct CwlEngine {
    status: WorkflowStatus,
    output_dir: PathBuf,
    engine_binary: String,
}

impl CwlEngine {
    pub fn new<P: AsRef<Path>>(output_dir: P, engine_binary: impl Into<String>) -> Self {
        Self {
            status: WorkflowStatus::new(&output_dir),
            output_dir: output_dir.as_ref().to_path_buf(),
            engine_binary: engine_binary.into(),
        }
    }

    /// Translates the flow, writes the artifact set, and invokes the
    /// external runner.
    ///
    /// Translation errors propagate before anything is written; emission
    /// errors propagate before the first status record. A failure of the
    /// delegated execution itself does not: it is logged, recorded as
    /// [`RunState::Error`], and the call still returns `Ok` (terminal
    /// best-effort notification).
    pub fn execute(&self, flow: Flow) -> Result<(), EngineError> {
        let flow = normalize(flow);
        let ordered = linearize(&flow)?;
        let plan = Synthesizer::new(&flow).structured(&ordered);
        let artifact = Emitter::new(&self.output_dir).emit(&plan)?;

        self.status.save(RunState::Ready)?;
        self.status.save(RunState::Running)?;
        match self.delegate(&artifact) {
            Ok(()) => self.status.save(RunState::Finished),
            Err(message) => {
                log::error!("Delegated CWL execution failed: {message}");
                self.status.save(RunState::Error)
            }
        }
    }

    /// Blocking invocation of `<engine-binary> <workflow-file>
    /// <params-file>`. The runner's internal scheduling is not observed,
    /// only its overall termination.
    fn delegate(&self, artifact: &ArtifactPaths) -> Result<(), String> {
        let status = Command::new(&self.engine_binary)
            .arg(&artifact.workflow_file)
            .arg(&artifact.params_file)
            .status()
            .map_err(|e| format!("could not spawn '{}': {e}", self.engine_binary))?;
        if status.success() {
            Ok(())
        } else {
            Err(format!(
                "'{}' exited abnormally: {status}",
                self.engine_binary
            ))
        }
    }
}
