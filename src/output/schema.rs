//! Output JSON schema definitions for analysis results.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::{CallGraphNode, Report};
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level profile structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Schema version for compatibility checking
    pub version: String,

    /// Symbol the call graph is rooted at
    pub target_symbol: String,

    /// Event type the call graph was built from
    pub target_event: String,

    /// Totals per event type, first-observed order
    pub events: Vec<EventTotal>,

    /// Instructions per cycle, absent when no cycles were recorded
    pub ipc: Option<f64>,

    /// Call graph, absent when no sample matched the target
    pub call_graph: Option<GraphNode>,

    /// Top call paths into the target (ranked by weight)
    pub hot_paths: Vec<HotPath>,

    /// Records skipped because their shape was not understood
    pub unhandled_records: u64,

    /// Timestamp when profile was generated
    pub generated_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTotal {
    pub name: String,
    pub total: u64,
    pub samples: usize,
}

/// Serialized calling context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub symbol: String,
    pub weight: u64,
    pub depth: usize,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub callers: Vec<GraphNode>,
}

impl From<&CallGraphNode> for GraphNode {
    fn from(node: &CallGraphNode) -> Self {
        Self {
            symbol: node.key.label(),
            weight: node.accumulated_weight,
            depth: node.depth,
            callers: node.sorted_children().into_iter().map(GraphNode::from).collect(),
        }
    }
}

/// A hot path into the target (collapsed stack with weight)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack, outermost caller first (e.g., "main;lock;target")
    pub stack: String,

    /// Sampled weight of this exact path
    pub weight: u64,

    /// Percentage of the weight at the target
    pub percentage: f64,
}

/// Convert a finished run to the output profile format
pub fn to_profile(report: &Report, hot_paths: Vec<HotPath>) -> Profile {
    use chrono::Utc;

    let events = report
        .events
        .iter()
        .map(|(name, bucket)| EventTotal {
            name: name.to_string(),
            total: bucket.total_weight,
            samples: bucket.samples.len(),
        })
        .collect();

    Profile {
        version: SCHEMA_VERSION.to_string(),
        target_symbol: report.call_graph.target_symbol().to_string(),
        target_event: report.call_graph.target_event().to_string(),
        events,
        ipc: report.ipc().ok(),
        call_graph: report.call_graph.root().map(GraphNode::from),
        hot_paths,
        unhandled_records: report.unhandled_records,
        generated_at: Utc::now().to_rfc3339(),
    }
}
