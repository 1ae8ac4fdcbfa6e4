//! Replay of a recorded sample stream.
//!
//! Stands in for the live per-sample callback: each line of a JSON-lines
//! stream is one raw record, normalized and handed to the caller before the
//! next line is read. Records of an unknown shape are echoed for diagnosis
//! and skipped.

use super::record::RawRecord;
use super::sample::Sample;
use crate::utils::error::IngressError;
use log::{debug, warn};
use serde_json::Value;
use std::io::{BufRead, Write};

/// Counters for one replay run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Records normalized and delivered
    pub samples: u64,

    /// Records echoed and skipped
    pub unhandled: u64,
}

/// Replay every record in `reader`, calling `on_sample` once per sample.
///
/// Blank lines are ignored. Unhandled records are written to `echo` as
/// sorted `key=value` pairs and counted; they never end the replay. Only a
/// failure of the underlying reader or of `echo` is returned as an error.
pub fn replay<R, W, F>(reader: R, echo: &mut W, mut on_sample: F) -> Result<ReplayStats, IngressError>
where
    R: BufRead,
    W: Write,
    F: FnMut(Sample),
{
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_record(line) {
            Ok(record) => {
                on_sample(record.into_sample());
                stats.samples += 1;
            }
            Err(e) => {
                warn!("Record {} not handled: {}", index + 1, e);
                let description = match serde_json::from_str::<Value>(line) {
                    Ok(value) => describe_unhandled(&value),
                    Err(_) => line.to_string(),
                };
                writeln!(echo, "{}", description)?;
                stats.unhandled += 1;
            }
        }
    }

    debug!(
        "Replay finished: {} samples, {} unhandled records",
        stats.samples, stats.unhandled
    );

    Ok(stats)
}

fn parse_record(line: &str) -> Result<RawRecord, IngressError> {
    let value: Value = serde_json::from_str(line)?;
    if !value.is_object() {
        return Err(IngressError::UnhandledRecord(format!(
            "expected a JSON object, found {}",
            value
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Render a record as perf script does for unhandled events: the top-level
/// fields, then the nested sample fields on a second line.
pub fn describe_unhandled(record: &Value) -> String {
    let Some(fields) = record.as_object() else {
        return record.to_string();
    };

    let mut top: Vec<(&String, &Value)> = fields.iter().filter(|(k, _)| k.as_str() != "sample").collect();
    top.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = join_fields(&top, " ");

    if let Some(sample) = fields.get("sample").and_then(Value::as_object) {
        let mut nested: Vec<(&String, &Value)> = sample.iter().collect();
        nested.sort_by(|a, b| a.0.cmp(b.0));
        out.push_str(&format!("\nSample: {{{}}}", join_fields(&nested, ", ")));
    }

    out
}

fn join_fields(fields: &[(&String, &Value)], delimiter: &str) -> String {
    fields
        .iter()
        .map(|(k, v)| match v {
            Value::String(s) => format!("{}={}", k, s),
            other => format!("{}={}", k, other),
        })
        .collect::<Vec<_>>()
        .join(delimiter)
}
