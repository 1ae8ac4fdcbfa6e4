//! Weighted call graph rooted at one target symbol.
//!
//! Every qualifying sample adds its full weight to the root and to each
//! caller node along its chain. Two samples sharing a caller prefix share
//! the nodes of that prefix; the tree forks where their chains diverge.
//! Weights are path-inclusive: a node's weight counts every sample that
//! passed through it, so summing a level can exceed the event total.

use crate::ingress::{FrameKey, Sample};
use crate::utils::config::GRAPH_INDENT;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// One calling context in the merged tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallGraphNode {
    pub key: FrameKey,
    pub accumulated_weight: u64,

    /// Distance from the root (root = 0)
    pub depth: usize,

    // Keyed by frame, so a key appears at most once per parent
    children: HashMap<FrameKey, CallGraphNode>,
}

impl CallGraphNode {
    pub fn new(key: FrameKey, accumulated_weight: u64, depth: usize) -> Self {
        Self {
            key,
            accumulated_weight,
            depth,
            children: HashMap::new(),
        }
    }

    /// Add `weight` to the caller `key`, creating it on first sight.
    /// Returns the caller so the walk can continue outward.
    pub fn add_caller(&mut self, key: FrameKey, weight: u64) -> &mut CallGraphNode {
        let depth = self.depth + 1;
        let caller = self
            .children
            .entry(key)
            .or_insert_with_key(|key| CallGraphNode::new(key.clone(), 0, depth));
        caller.accumulated_weight = caller.accumulated_weight.saturating_add(weight);
        caller
    }

    pub fn child(&self, key: &FrameKey) -> Option<&CallGraphNode> {
        self.children.get(key)
    }

    pub fn children(&self) -> impl Iterator<Item = &CallGraphNode> {
        self.children.values()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children heaviest first, ties broken by key
    pub fn sorted_children(&self) -> Vec<&CallGraphNode> {
        let mut children: Vec<&CallGraphNode> = self.children.values().collect();
        children.sort_by(|a, b| {
            b.accumulated_weight
                .cmp(&a.accumulated_weight)
                .then_with(|| a.key.cmp(&b.key))
        });
        children
    }

    /// Weight of samples whose chain ends at this node
    pub fn self_weight(&self) -> u64 {
        let callers = self
            .children
            .values()
            .fold(0u64, |sum, c| sum.saturating_add(c.accumulated_weight));
        self.accumulated_weight.saturating_sub(callers)
    }

    /// Number of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        1 + self.children.values().map(CallGraphNode::node_count).sum::<usize>()
    }

    /// Deepest depth reached in this subtree
    pub fn max_depth(&self) -> usize {
        self.children
            .values()
            .map(CallGraphNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&GRAPH_INDENT.repeat(self.depth));
        out.push_str(&format!("{}: {}\n", self.key, self.accumulated_weight));
        for child in self.sorted_children() {
            child.render_into(out);
        }
    }
}

/// The call graph for a single (symbol, event type) target.
#[derive(Debug, Clone)]
pub struct CallGraph {
    target_symbol: String,
    target_event: String,
    root: Option<CallGraphNode>,
}

impl CallGraph {
    pub fn new(target_symbol: impl Into<String>, target_event: impl Into<String>) -> Self {
        Self {
            target_symbol: target_symbol.into(),
            target_event: target_event.into(),
            root: None,
        }
    }

    pub fn target_symbol(&self) -> &str {
        &self.target_symbol
    }

    pub fn target_event(&self) -> &str {
        &self.target_event
    }

    pub fn root(&self) -> Option<&CallGraphNode> {
        self.root.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        sample.symbol == self.target_symbol && sample.event_name == self.target_event
    }

    /// Fold one sample into the graph.
    ///
    /// Samples for another symbol or event type are ignored. Returns whether
    /// the sample was absorbed.
    pub fn process(&mut self, sample: &Sample) -> bool {
        if !self.matches(sample) {
            return false;
        }

        let weight = sample.weight;
        let root = self.root.get_or_insert_with(|| {
            debug!("Creating call graph root for {}", self.target_symbol);
            CallGraphNode::new(FrameKey::Symbol(self.target_symbol.clone()), 0, 0)
        });
        root.accumulated_weight = root.accumulated_weight.saturating_add(weight);

        // Frame 0 is the target itself, already counted by the root
        let mut node = root;
        for frame in sample.callers() {
            node = node.add_caller(frame.key(), weight);
        }

        true
    }

    /// Follow `path` (callers, innermost first) down from the root
    pub fn find_path(&self, path: &[FrameKey]) -> Option<&CallGraphNode> {
        let mut node = self.root.as_ref()?;
        for key in path {
            node = node.child(key)?;
        }
        Some(node)
    }

    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, CallGraphNode::node_count)
    }

    pub fn max_depth(&self) -> usize {
        self.root.as_ref().map_or(0, CallGraphNode::max_depth)
    }

    /// Total weight at the target symbol, 0 when empty
    pub fn total_weight(&self) -> u64 {
        self.root.as_ref().map_or(0, |root| root.accumulated_weight)
    }
}

impl fmt::Display for CallGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symbol: {}", self.target_symbol)?;
        match &self.root {
            Some(root) => {
                let mut out = String::new();
                root.render_into(&mut out);
                f.write_str(&out)
            }
            None => writeln!(f, "{}(no samples)", GRAPH_INDENT),
        }
    }
}
