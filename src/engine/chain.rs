//! The task-chain delegation front end: turns the flat command dialect into
//! a chain of externally scheduled tasks, each depending on its immediate
//! predecessor, and submits the chain through a [`JobClient`].

use super::status::{RunState, WorkflowStatus};
use crate::error::EngineError;
use crate::flow::Flow;
use crate::graph::{linearize, normalize};
use crate::synth::flat_commands;
use std::path::Path;
use std::process::Command;

/// Errors an external job-management client may raise. The client is a
/// black box; its failures are surfaced opaquely and handled at the
/// delegation boundary.
pub type JobClientError = Box<dyn std::error::Error + Send + Sync>;

/// One externally scheduled unit of the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: usize,
    pub name: String,
    pub command: String,
    /// The task this one waits for; `None` only for the chain head.
    pub parent: Option<usize>,
}

/// A named, linearly dependent sequence of tasks submitted as one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChain {
    pub name: String,
    pub tasks: Vec<Task>,
}

impl TaskChain {
    /// Builds the chain from the flat command sequence: task `task_<idx>`
    /// depends on `task_<idx - 1>`.
    pub fn from_commands(name: impl Into<String>, commands: Vec<String>) -> Self {
        let tasks = commands
            .into_iter()
            .enumerate()
            .map(|(idx, command)| Task {
                id: idx,
                name: format!("task_{idx}"),
                command,
                parent: idx.checked_sub(1),
            })
            .collect();
        Self {
            name: name.into(),
            tasks,
        }
    }
}

/// The external job-management seam: reset prior state, submit a chain as
/// one named job, and run it synchronously to completion.
pub trait JobClient {
    fn reset(&mut self) -> Result<(), JobClientError>;
    fn submit(&mut self, chain: &TaskChain) -> Result<(), JobClientError>;
    fn run_to_completion(&mut self) -> Result<(), JobClientError>;
}

/// A [`JobClient`] that runs the submitted chain locally, one task after
/// another via `sh -c`. Useful without an external scheduler and as the
/// reference implementation of the seam.
#[derive(Default)]
pub struct LocalShellClient {
    submitted: Option<TaskChain>,
}

impl LocalShellClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl JobClient for LocalShellClient {
    fn reset(&mut self) -> Result<(), JobClientError> {
        self.submitted = None;
        Ok(())
    }

    fn submit(&mut self, chain: &TaskChain) -> Result<(), JobClientError> {
        self.submitted = Some(chain.clone());
        Ok(())
    }

    fn run_to_completion(&mut self) -> Result<(), JobClientError> {
        let chain = self.submitted.take().ok_or("no job chain submitted")?;
        for task in &chain.tasks {
            log::debug!("running {}: {}", task.name, task.command);
            let status = Command::new("sh").arg("-c").arg(&task.command).status()?;
            if !status.success() {
                return Err(format!("{} exited abnormally: {status}", task.name).into());
            }
        }
        Ok(())
    }
}

/// Drives one flow through flat synthesis and chained delegated execution.
pub struct ChainEngine<C: JobClient> {
    status: WorkflowStatus,
    client: C,
}

impl<C: JobClient> ChainEngine<C> {
    pub fn new<P: AsRef<Path>>(output_dir: P, client: C) -> Self {
        Self {
            status: WorkflowStatus::new(output_dir),
            client,
        }
    }

    /// Synthesizes the flat command chain and submits it as one job named
    /// `job_name`.
    ///
    /// Graph errors propagate before any status side effect; client
    /// failures are logged, recorded as [`RunState::Error`], and swallowed.
    pub fn execute(&mut self, flow: Flow, job_name: &str) -> Result<(), EngineError> {
        let flow = normalize(flow);
        let ordered = linearize(&flow)?;
        let chain = TaskChain::from_commands(job_name, flat_commands(&ordered));

        self.status.save(RunState::Ready)?;
        match self.delegate(&chain) {
            Ok(()) => self.status.save(RunState::Finished),
            Err(e) => {
                log::error!("Delegated chain execution failed: {e}");
                self.status.save(RunState::Error)
            }
        }
    }

    fn delegate(&mut self, chain: &TaskChain) -> Result<(), JobClientError> {
        self.client.reset()?;
        // RUNNING is recorded before the chain is handed over; a failing
        // status write here is reported like a client failure.
        self.status
            .save(RunState::Running)
            .map_err(|e| -> JobClientError { Box::new(e) })?;
        self.client.submit(chain)?;
        self.client.run_to_completion()
    }
}
