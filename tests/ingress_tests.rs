use perf_cccost::aggregator::Session;
use perf_cccost::ingress::{replay, FrameKey, RawRecord};
use perf_cccost::utils::config::{UNKNOWN_DSO, UNKNOWN_SYMBOL};
use std::io::Cursor;

const STREAM: &str = r#"
{"ev_name": "cycles:pp", "comm": "fio", "sample": {"period": 700, "pid": 11, "tid": 12, "cpu": 2, "time": 1000000000, "ip": 4096}, "dso": "[kernel.kallsyms]", "symbol": "native_queued_spin_lock_slowpath", "callchain": [{"ip": 4096, "sym": {"name": "native_queued_spin_lock_slowpath"}}, {"ip": 4200, "sym": {"name": "_raw_spin_lock"}}, {"ip": 4300}]}
{"ev_name": "instructions", "comm": "fio", "sample": {"period": 1400, "pid": 11}}
{"ev_name": "sched:sched_switch", "prev_comm": "fio"}
{"ev_name": "cycles:pp", "comm": "fio", "sample": {"period": 300}, "symbol": "native_queued_spin_lock_slowpath", "callchain": [{"ip": 4096, "sym": {"name": "native_queued_spin_lock_slowpath"}}, {"ip": 4200, "sym": {"name": "_raw_spin_lock"}}, {"ip": 4400, "sym": null}]}
"#;

#[test]
fn test_replay_into_session() {
    let mut session = Session::new("native_queued_spin_lock_slowpath", "cycles:pp");
    let mut echo = Vec::new();

    let stats = replay(Cursor::new(STREAM), &mut echo, |s| session.process(s)).unwrap();
    session.note_unhandled(stats.unhandled);
    let report = session.finalize();

    assert_eq!(stats.samples, 3);
    assert_eq!(report.unhandled_records, 1);
    assert!(String::from_utf8(echo).unwrap().contains("prev_comm=fio"));

    assert_eq!(report.events.total_for("cycles:pp"), 1000);
    assert_eq!(report.events.total_for("instructions"), 1400);

    let graph = &report.call_graph;
    assert_eq!(graph.total_weight(), 1000);
    let lock = graph.find_path(&[FrameKey::from("_raw_spin_lock")]).unwrap();
    assert_eq!(lock.accumulated_weight, 1000);
    assert_eq!(lock.child_count(), 2);
    assert_eq!(
        graph
            .find_path(&[FrameKey::from("_raw_spin_lock"), FrameKey::Address(4400)])
            .unwrap()
            .accumulated_weight,
        300
    );
}

#[test]
fn test_sample_fields_carried() {
    let line = STREAM.lines().nth(1).unwrap();
    let sample = serde_json::from_str::<RawRecord>(line).unwrap().into_sample();

    assert_eq!(sample.process_name, "fio");
    assert_eq!(sample.pid, 11);
    assert_eq!(sample.tid, 12);
    assert_eq!(sample.cpu, 2);
    assert_eq!(sample.time_ns, 1_000_000_000);
    assert_eq!(sample.module, "[kernel.kallsyms]");
}

#[test]
fn test_unresolved_record_falls_back() {
    let line = STREAM.lines().nth(2).unwrap();
    let sample = serde_json::from_str::<RawRecord>(line).unwrap().into_sample();

    assert_eq!(sample.symbol, UNKNOWN_SYMBOL);
    assert_eq!(sample.module, UNKNOWN_DSO);
    assert_eq!(sample.call_chain.len(), 1);
}

#[test]
fn test_malformed_callchain_keeps_weight() {
    let input = concat!(
        r#"{"ev_name": "cycles:pp", "symbol": "foo", "sample": {"period": 5}, "callchain": "bogus"}"#,
        "\n",
        r#"{"ev_name": "cycles:pp", "symbol": "foo", "sample": {"period": 7}, "callchain": [{"ip": "x"}]}"#,
        "\n"
    );
    let mut session = Session::new("foo", "cycles:pp");
    let mut echo = Vec::new();

    let stats = replay(Cursor::new(input), &mut echo, |s| session.process(s)).unwrap();
    let report = session.finalize();

    assert_eq!(stats.samples, 2);
    assert_eq!(stats.unhandled, 0);
    assert!(echo.is_empty());
    assert_eq!(report.events.total_for("cycles:pp"), 12);
    assert_eq!(report.call_graph.total_weight(), 12);
    assert!(report.call_graph.root().unwrap().is_leaf());
}

#[test]
fn test_huge_periods_do_not_abort() {
    let input = concat!(
        r#"{"ev_name": "cycles:pp", "symbol": "foo", "sample": {"period": 18446744073709551615}, "callchain": [{"ip": 1, "sym": {"name": "foo"}}, {"ip": 2, "sym": {"name": "main"}}]}"#,
        "\n",
        r#"{"ev_name": "cycles:pp", "symbol": "foo", "sample": {"period": 1}, "callchain": [{"ip": 1, "sym": {"name": "foo"}}, {"ip": 2, "sym": {"name": "main"}}]}"#,
        "\n"
    );
    let mut session = Session::new("foo", "cycles:pp");
    let mut echo = Vec::new();

    replay(Cursor::new(input), &mut echo, |s| session.process(s)).unwrap();
    let report = session.finalize();

    assert_eq!(report.events.total_for("cycles:pp"), u64::MAX);
    assert_eq!(report.call_graph.total_weight(), u64::MAX);
    assert_eq!(
        report.call_graph.find_path(&[FrameKey::from("main")]).unwrap().accumulated_weight,
        u64::MAX
    );
}
