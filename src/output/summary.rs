//! End-of-run text report.
//!
//! Layout: one line per event type (name left-justified, total
//! right-justified), the IPC line, the indented call graph, then the hot
//! paths when there are any.

use super::schema::HotPath;
use crate::aggregator::{EventAggregator, Report};
use crate::utils::config::{EVENT_NAME_WIDTH, EVENT_TOTAL_WIDTH};
use crate::utils::error::AnalysisError;

/// One `name total` line per observed event type; empty when none
pub fn format_event_summary(events: &EventAggregator) -> String {
    events
        .summarize()
        .into_iter()
        .map(|(name, total)| {
            format!(
                "{:<name_w$} {:>total_w$}\n",
                name,
                total,
                name_w = EVENT_NAME_WIDTH,
                total_w = EVENT_TOTAL_WIDTH
            )
        })
        .collect()
}

pub fn format_ipc(ipc: Result<f64, AnalysisError>) -> String {
    match ipc {
        Ok(value) => format!("IPC: {:.3}", value),
        Err(AnalysisError::DivisionByZero) => "IPC: n/a (no cycles recorded)".to_string(),
    }
}

pub fn format_hot_paths(hot_paths: &[HotPath]) -> String {
    if hot_paths.is_empty() {
        return String::new();
    }

    let mut out = String::from("Hot paths:\n");
    for (i, path) in hot_paths.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}. {:>10} {:>6.1}%  {}\n",
            i + 1,
            path.weight,
            path.percentage,
            path.stack
        ));
    }
    out
}

/// Full report as printed at the end of a run
pub fn render_report(report: &Report, hot_paths: &[HotPath]) -> String {
    let mut out = format_event_summary(&report.events);
    if !report.events.is_empty() {
        out.push_str(&format_ipc(report.ipc()));
        out.push('\n');
    }
    out.push_str(&report.call_graph.to_string());

    let paths = format_hot_paths(hot_paths);
    if !paths.is_empty() {
        out.push('\n');
        out.push_str(&paths);
    }
    out
}

pub fn print_report(report: &Report, hot_paths: &[HotPath]) {
    print!("{}", render_report(report, hot_paths));
}
