//! Raw record shape handed over by the trace source.
//!
//! One record per sample, mirroring the handler dictionary perf script
//! builds: `ev_name`, `comm`, `attr`, `raw_buf`, the nested `sample`
//! fields, and optional `dso`/`symbol`/`callchain` resolution.

use super::sample::{Frame, Sample};
use crate::utils::config::{UNKNOWN_DSO, UNKNOWN_SYMBOL};
use log::warn;
use serde::{Deserialize, Deserializer, Serialize};

/// Resolved symbol attached to a call chain entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSymbol {
    #[serde(default)]
    pub name: Option<String>,
}

/// One entry of the raw call chain
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCallchainEntry {
    #[serde(default)]
    pub ip: u64,

    #[serde(default)]
    pub sym: Option<RawSymbol>,
}

/// Perf sample fields nested under `sample`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSampleFields {
    /// Sampled period, used as the weight
    #[serde(default)]
    pub period: u64,

    #[serde(default)]
    pub pid: u32,

    #[serde(default)]
    pub tid: u32,

    #[serde(default)]
    pub cpu: u32,

    #[serde(default)]
    pub time: u64,

    #[serde(default)]
    pub ip: u64,
}

/// A record as delivered by the external trace source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "event_name")]
    pub ev_name: String,

    #[serde(default)]
    pub comm: String,

    /// Counter attributes, carried opaquely
    #[serde(default)]
    pub attr: serde_json::Value,

    #[serde(default)]
    pub raw_buf: Vec<u8>,

    pub sample: RawSampleFields,

    #[serde(default)]
    pub dso: Option<String>,

    #[serde(default)]
    pub symbol: Option<String>,

    /// Malformed chains deserialize to `None` rather than failing the record
    #[serde(default, deserialize_with = "lenient_callchain")]
    pub callchain: Option<Vec<RawCallchainEntry>>,
}

fn lenient_callchain<'de, D>(deserializer: D) -> Result<Option<Vec<RawCallchainEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(value) = value else {
        return Ok(None);
    };

    match serde_json::from_value(value) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) => {
            warn!("Malformed callchain, keeping only the leaf frame: {}", e);
            Ok(None)
        }
    }
}

impl RawRecord {
    /// Normalize into a `Sample`.
    ///
    /// Missing leaf resolution falls back to the `Unknown_symbol` and
    /// `Unknown_dso` sentinels. A missing or empty call chain becomes a
    /// chain holding only the leaf frame.
    pub fn into_sample(self) -> Sample {
        let symbol = self.symbol.unwrap_or_else(|| UNKNOWN_SYMBOL.to_string());
        let module = self.dso.unwrap_or_else(|| UNKNOWN_DSO.to_string());

        let call_chain: Vec<Frame> = match self.callchain {
            Some(entries) if !entries.is_empty() => entries
                .into_iter()
                .map(|entry| Frame::new(entry.ip, entry.sym.and_then(|sym| sym.name)))
                .collect(),
            _ => vec![Frame::new(self.sample.ip, Some(symbol.clone()))],
        };

        Sample {
            event_name: self.ev_name,
            process_name: self.comm,
            module,
            symbol,
            weight: self.sample.period,
            call_chain,
            pid: self.sample.pid,
            tid: self.sample.tid,
            cpu: self.sample.cpu,
            time_ns: self.sample.time,
        }
    }
}
