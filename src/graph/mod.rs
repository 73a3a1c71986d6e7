//! Graph processing stages: normalization and topological linearization.

pub mod linearizer;
pub mod normalizer;

pub use linearizer::linearize;
pub use normalizer::normalize;
