use perf_cccost::aggregator::{build_collapsed_stacks, CallGraph, CallGraphNode, Session};
use perf_cccost::ingress::{Frame, FrameKey, Sample};
use pretty_assertions::assert_eq;
use std::collections::HashSet;

fn sample(event: &str, symbol: &str, weight: u64, chain: &[&str]) -> Sample {
    let frames = chain
        .iter()
        .enumerate()
        .map(|(i, s)| Frame::resolved(0x1000 + i as u64, *s))
        .collect();
    Sample::new(event, symbol, weight, frames)
}

fn path(keys: &[&str]) -> Vec<FrameKey> {
    keys.iter().map(|k| FrameKey::from(*k)).collect()
}

fn assert_unique_children(node: &CallGraphNode) {
    let keys: HashSet<&FrameKey> = node.children().map(|c| &c.key).collect();
    assert_eq!(keys.len(), node.child_count());
    for child in node.children() {
        assert_eq!(child.depth, node.depth + 1);
        assert_unique_children(child);
    }
}

#[test]
fn test_end_to_end_scenario() {
    let mut session = Session::new("foo", "cycles:pp");
    session.process(sample("cycles:pp", "foo", 10, &["foo", "bar", "main"]));
    session.process(sample("cycles:pp", "foo", 20, &["foo", "baz", "main"]));
    session.process(sample("cycles:pp", "other", 5, &["other"]));
    let report = session.finalize();

    let graph = &report.call_graph;
    let root = graph.root().unwrap();
    assert_eq!(root.key, FrameKey::from("foo"));
    assert_eq!(root.accumulated_weight, 30);
    assert_eq!(root.child_count(), 2);

    assert_eq!(graph.find_path(&path(&["bar"])).unwrap().accumulated_weight, 10);
    assert_eq!(graph.find_path(&path(&["bar", "main"])).unwrap().accumulated_weight, 10);
    assert_eq!(graph.find_path(&path(&["baz"])).unwrap().accumulated_weight, 20);
    assert_eq!(graph.find_path(&path(&["baz", "main"])).unwrap().accumulated_weight, 20);
    assert!(graph.find_path(&path(&["other"])).is_none());

    assert_eq!(report.events.summarize(), vec![("cycles:pp".to_string(), 35)]);
}

#[test]
fn test_shared_prefix_then_divergence() {
    let mut graph = CallGraph::new("spin", "cycles");
    graph.process(&sample("cycles", "spin", 3, &["spin", "lock", "vfs_read", "read", "main"]));
    graph.process(&sample("cycles", "spin", 4, &["spin", "lock", "vfs_read", "pread", "main"]));

    // The two samples share lock -> vfs_read, then fork
    for prefix in [&["lock"][..], &["lock", "vfs_read"][..]] {
        let node = graph.find_path(&path(prefix)).unwrap();
        assert_eq!(node.accumulated_weight, 7);
    }
    let fork = graph.find_path(&path(&["lock", "vfs_read"])).unwrap();
    assert_eq!(fork.child_count(), 2);
    assert_eq!(graph.find_path(&path(&["lock", "vfs_read", "read"])).unwrap().accumulated_weight, 3);
    assert_eq!(graph.find_path(&path(&["lock", "vfs_read", "pread"])).unwrap().accumulated_weight, 4);
}

#[test]
fn test_weight_conservation_and_uniqueness() {
    let chains: &[&[&str]] = &[
        &["t", "a", "b"],
        &["t", "a", "c"],
        &["t", "a", "b"],
        &["t", "d"],
        &["t"],
        &["t", "a", "b", "e"],
    ];
    let mut graph = CallGraph::new("t", "cycles");
    let mut total = 0;
    for (i, chain) in chains.iter().enumerate() {
        let weight = (i as u64 + 1) * 100;
        total += weight;
        graph.process(&sample("cycles", "t", weight, chain));
    }

    let root = graph.root().unwrap();
    assert_eq!(root.accumulated_weight, total);
    assert_unique_children(root);

    // a is on chains 0, 1, 2 and 5
    assert_eq!(graph.find_path(&path(&["a"])).unwrap().accumulated_weight, 100 + 200 + 300 + 600);
    // a;b is on chains 0, 2 and 5
    assert_eq!(graph.find_path(&path(&["a", "b"])).unwrap().accumulated_weight, 100 + 300 + 600);

    let collapsed: u64 = build_collapsed_stacks(&graph).iter().map(|s| s.weight).sum();
    assert_eq!(collapsed, total);
}

#[test]
fn test_same_symbol_at_different_depths_is_distinct() {
    let mut graph = CallGraph::new("t", "cycles");
    graph.process(&sample("cycles", "t", 1, &["t", "r", "r", "r"]));

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.max_depth(), 3);
    assert_eq!(graph.find_path(&path(&["r", "r", "r"])).unwrap().depth, 3);
}

#[test]
fn test_mixed_resolved_and_raw_frames() {
    let mut graph = CallGraph::new("t", "cycles");
    let frames = vec![
        Frame::resolved(0x10, "t"),
        Frame::unresolved(0xffffffff81000010),
        Frame::resolved(0x30, "main"),
    ];
    graph.process(&Sample::new("cycles", "t", 9, frames));

    let rendered = graph.to_string();
    assert_eq!(rendered, "Symbol: t\nt: 9\n  0xffffffff81000010: 9\n    main: 9\n");
}

#[test]
fn test_render_without_matches() {
    let mut session = Session::new("native_queued_spin_lock_slowpath", "cycles:pp");
    session.process(sample("cycles:pp", "memcpy", 100, &["memcpy", "main"]));

    let report = session.finalize();
    assert_eq!(
        report.call_graph.to_string(),
        "Symbol: native_queued_spin_lock_slowpath\n  (no samples)\n"
    );
}
