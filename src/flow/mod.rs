//! The flow document: raw on-disk format, canonical typed model, and the
//! conversion seam between them.

pub mod conversion;
pub mod document;
pub mod model;

pub use conversion::IntoFlow;
pub use document::FlowDocument;
pub use model::{
    Connection, Flow, Node, NodeId, NodeKind, Port, PortType, PortValue, ToolSpec, ValueKind, slot,
};
