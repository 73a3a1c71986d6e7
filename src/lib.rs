//! # flowc - Flow-to-Workflow Compiler
//!
//! **flowc** translates a visual, node-and-connection "flow" description (a
//! JSON graph of file inputs, file outputs, and command-line tool nodes
//! joined by directed data connections) into an executable pipeline
//! description: either a set of CWL v1.0 workflow files for an external
//! cwl-runner, or a flat shell-command chain for an external job scheduler.
//!
//! ## Core Workflow
//!
//! The translation core is format-agnostic and runs as a strict left-to-right
//! pipeline of stages, each fully consuming its predecessor's output:
//!
//! 1.  **Load**: parse the `.flow` JSON (or implement [`flow::IntoFlow`] for
//!     your own graph format) into the canonical [`flow::Flow`] model.
//! 2.  **Normalize**: [`graph::normalize`] strips value-carrier nodes, prunes
//!     dangling connections, and computes in-degrees.
//! 3.  **Linearize**: [`graph::linearize`] orders the nodes into the single
//!     execution chain, rejecting branching or disconnected graphs with
//!     typed errors.
//! 4.  **Synthesize**: [`synth::Synthesizer`] derives either structured
//!     steps with declarative stream wiring, or flat shell commands.
//! 5.  **Emit / delegate**: [`cwl::Emitter`] writes the workflow artifact
//!     set; the [`engine`] front ends hand it to an external runner and
//!     record the coarse run state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use flowc::prelude::*;
//!
//! fn main() -> Result<()> {
//!     // 1. Load the flow document into the canonical model.
//!     let flow = Flow::from_file("pipeline.flow")?;
//!
//!     // 2. + 3. Normalize and linearize the graph.
//!     let flow = normalize(flow);
//!     let ordered = linearize(&flow)?;
//!
//!     // 4. Synthesize the structured step plan.
//!     let plan = Synthesizer::new(&flow).structured(&ordered);
//!     println!("Workflow '{}' with {} steps", plan.workflow_name(), plan.steps.len());
//!
//!     // 5. Emit the CWL artifact set into an output directory.
//!     let artifact = Emitter::new("out").emit(&plan)?;
//!     println!("Wrote workflow file {}", artifact.workflow_file.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! To run the emitted workflow through an external engine and track its
//! status, use [`engine::CwlEngine`] (cwl-runner delegation) or
//! [`engine::ChainEngine`] (task-chain delegation via a [`engine::JobClient`]
//! implementation) instead of driving the stages by hand.

pub mod cwl;
pub mod engine;
pub mod error;
pub mod flow;
pub mod graph;
pub mod prelude;
pub mod synth;
