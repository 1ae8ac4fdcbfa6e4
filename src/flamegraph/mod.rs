//! Flamegraph generation using the inferno library.
//!
//! This module converts the call graph into an SVG flamegraph with the
//! outermost callers at the base and the target symbol on top.

pub mod generator;

// Re-export main types
pub use generator::{generate_flamegraph, FlamegraphConfig};
