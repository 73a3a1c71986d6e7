//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types and functions of the crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use flowc::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let flow = normalize(Flow::from_file("pipeline.flow")?);
//! let ordered = linearize(&flow)?;
//! let plan = Synthesizer::new(&flow).structured(&ordered);
//! Emitter::new("out").emit(&plan)?;
//! # Ok(())
//! # }
//! ```

// Flow model and loading
pub use crate::flow::{Connection, Flow, IntoFlow, Node, NodeId, NodeKind, Port, PortType, PortValue, ToolSpec};

// Graph stages
pub use crate::graph::{linearize, normalize};

// Synthesis
pub use crate::synth::{ParamValue, Step, Synthesizer, WorkflowPlan, flat_commands, pipeline_string};

// Emission and delegation
pub use crate::cwl::{ArtifactPaths, Emitter};
pub use crate::engine::{ChainEngine, CwlEngine, LocalShellClient, RunState, WorkflowStatus};

// Error types
pub use crate::error::{EmitError, EngineError, FlowError, LinearizeError};

// Standard library re-exports commonly used with this crate
pub use std::path::Path;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
