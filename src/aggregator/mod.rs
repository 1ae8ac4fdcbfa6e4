//! Aggregation of samples into event totals and a call graph.
//!
//! This module turns the sample stream into:
//! - Per-event-type totals (and the IPC derived from them)
//! - A weighted call graph rooted at the target symbol
//! - Collapsed stacks and hot paths for flamegraphs and reports

pub mod call_graph;
pub mod events;
pub mod metrics;
pub mod session;
pub mod stack_builder;

// Re-export main types and functions
pub use call_graph::{CallGraph, CallGraphNode};
pub use events::{EventAggregator, EventBucket};
pub use metrics::{calculate_hot_paths, create_hot_path};
pub use session::{Report, Session};
pub use stack_builder::{build_collapsed_stacks, CollapsedStack};
