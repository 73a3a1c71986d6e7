//! Delegation front ends and the run-status record. The translation core
//! never executes anything itself; these modules hand complete artifacts to
//! external collaborators and track only their coarse overall outcome.

pub mod chain;
pub mod cwl;
pub mod status;

pub use chain::{ChainEngine, JobClient, JobClientError, LocalShellClient, Task, TaskChain};
pub use cwl::CwlEngine;
pub use status::{RunState, STATUS_FILE, WorkflowStatus};
