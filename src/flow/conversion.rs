use super::document::FlowDocument;
use super::model::Flow;
use crate::error::FlowError;
use std::fs;
use std::path::Path;

/// A trait for custom data models that can be converted into a canonical
/// [`Flow`].
///
/// This is the extension point that keeps the translation core
/// format-agnostic: the bundled [`FlowDocument`] implements it for the
/// editor's `.flow` JSON, and callers with their own graph format can
/// implement it on their parsing structs to reuse the whole pipeline
/// (normalization, linearization, synthesis, emission) unchanged.
pub trait IntoFlow {
    /// Consumes the object and converts it into a canonical flow graph.
    fn into_flow(self) -> Result<Flow, FlowError>;
}

impl Flow {
    /// Parses a `.flow` JSON document into the canonical model.
    pub fn from_json_str(json: &str) -> Result<Self, FlowError> {
        let document: FlowDocument = serde_json::from_str(json)?;
        document.into_flow()
    }

    /// Reads and parses a `.flow` file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FlowError> {
        let content = fs::read_to_string(&path).map_err(|e| FlowError::FileReadError {
            path: path.as_ref().display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&content)
    }
}
