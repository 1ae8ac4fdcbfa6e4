//! Build collapsed stack format from the call graph.
//!
//! Collapsed stacks are the input format for flamegraph generation.
//! Format: "outermost;caller;target weight"
//!
//! Example: "main;do_sys_open;_raw_spin_lock;native_queued_spin_lock_slowpath 1000"
//! This means: 1000 sampled cycles at the target whose call chain ended
//! (outermost) at main.

use super::call_graph::{CallGraph, CallGraphNode};
use log::debug;

/// A single collapsed stack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollapsedStack {
    /// Stack trace as semicolon-separated string, outermost frame first
    pub stack: String,

    /// Weight of samples whose chain is exactly this stack
    pub weight: u64,
}

impl CollapsedStack {
    pub fn new(stack: String, weight: u64) -> Self {
        Self { stack, weight }
    }

    /// Line as consumed by inferno
    pub fn to_line(&self) -> String {
        format!("{} {}", self.stack, self.weight)
    }

    /// Frame the stack was sampled in (the graph's target)
    pub fn leaf(&self) -> &str {
        self.stack.split(';').next_back().unwrap_or(&self.stack)
    }
}

/// Build collapsed stacks from the call graph
///
/// # Returns
/// One stack per node where at least one sample's chain ends, heaviest
/// first. The weights sum to the root weight; an empty graph yields an
/// empty vector.
///
/// # Algorithm
/// 1. Walk the tree depth-first, keeping the path from the root
/// 2. At every node, take its self weight (own weight minus its callers)
/// 3. Emit the reversed path with that weight when it is non-zero
pub fn build_collapsed_stacks(graph: &CallGraph) -> Vec<CollapsedStack> {
    let Some(root) = graph.root() else {
        debug!("Call graph is empty, no stacks to collapse");
        return Vec::new();
    };

    let mut stacks = Vec::new();
    let mut path: Vec<String> = Vec::new();
    collect_stacks(root, &mut path, &mut stacks);

    stacks.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.stack.cmp(&b.stack)));

    debug!("Built {} collapsed stacks", stacks.len());

    stacks
}

fn collect_stacks(node: &CallGraphNode, path: &mut Vec<String>, out: &mut Vec<CollapsedStack>) {
    path.push(node.key.label());

    let self_weight = node.self_weight();
    if self_weight > 0 {
        let stack: Vec<&str> = path.iter().rev().map(String::as_str).collect();
        out.push(CollapsedStack::new(stack.join(";"), self_weight));
    }

    for child in node.children() {
        collect_stacks(child, path, out);
    }

    path.pop();
}
