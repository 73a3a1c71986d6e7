//! CWL v1.0 artifact construction and emission.

pub mod document;
pub mod emitter;

pub use document::{CommandLineToolDoc, WorkflowDoc};
pub use emitter::{ArtifactPaths, Emitter};
