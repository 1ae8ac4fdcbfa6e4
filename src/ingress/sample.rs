//! Normalized sample and call chain frame types.

use std::fmt;

/// Key identifying a calling context among its siblings.
///
/// A frame perf could symbolize is keyed by name; otherwise by its
/// instruction pointer, rendered as a hex address. The two variants never
/// compare equal: a symbol literally named `0x10` and an unresolved frame
/// at `0x10` are separate siblings even though both render as `0x10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameKey {
    Symbol(String),
    Address(u64),
}

impl FrameKey {
    pub fn symbol(name: impl Into<String>) -> Self {
        FrameKey::Symbol(name.into())
    }

    /// Label used in the rendered graph and in collapsed stacks
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKey::Symbol(name) => f.write_str(name),
            FrameKey::Address(ip) => write!(f, "{:#x}", ip),
        }
    }
}

impl From<&str> for FrameKey {
    fn from(name: &str) -> Self {
        FrameKey::Symbol(name.to_string())
    }
}

/// One frame of a call chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Raw instruction pointer, always present
    pub ip: u64,

    /// Resolved function name, if perf managed to symbolize the frame
    pub symbol: Option<String>,
}

impl Frame {
    pub fn new(ip: u64, symbol: Option<String>) -> Self {
        Self { ip, symbol }
    }

    /// Shorthand for a resolved frame, mostly useful in tests
    pub fn resolved(ip: u64, symbol: impl Into<String>) -> Self {
        Self::new(ip, Some(symbol.into()))
    }

    pub fn unresolved(ip: u64) -> Self {
        Self::new(ip, None)
    }

    pub fn key(&self) -> FrameKey {
        match &self.symbol {
            Some(name) => FrameKey::Symbol(name.clone()),
            None => FrameKey::Address(self.ip),
        }
    }
}

/// One hardware counter observation.
///
/// Built once per incoming record and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Counter type, e.g. "cycles:pp"
    pub event_name: String,

    /// Command name of the sampled task
    pub process_name: String,

    /// Resolved module of the leaf frame, or `Unknown_dso`
    pub module: String,

    /// Resolved symbol of the leaf frame, or `Unknown_symbol`
    pub symbol: String,

    /// Sampled period attributed to this observation
    pub weight: u64,

    /// Innermost frame first
    pub call_chain: Vec<Frame>,

    pub pid: u32,
    pub tid: u32,
    pub cpu: u32,

    /// Sample timestamp in nanoseconds
    pub time_ns: u64,
}

impl Sample {
    /// Build a sample carrying only the fields the reducers look at
    pub fn new(
        event_name: impl Into<String>,
        symbol: impl Into<String>,
        weight: u64,
        call_chain: Vec<Frame>,
    ) -> Self {
        Self {
            event_name: event_name.into(),
            process_name: String::new(),
            module: crate::utils::config::UNKNOWN_DSO.to_string(),
            symbol: symbol.into(),
            weight,
            call_chain,
            pid: 0,
            tid: 0,
            cpu: 0,
            time_ns: 0,
        }
    }

    /// Callers of the sampled frame, innermost first
    pub fn callers(&self) -> &[Frame] {
        self.call_chain.get(1..).unwrap_or(&[])
    }

    /// Header line in perf script's `print_header` layout
    pub fn header_line(&self) -> String {
        let secs = self.time_ns / 1_000_000_000;
        let nsecs = self.time_ns % 1_000_000_000;
        format!(
            "{:<20} {:>5} {:05}.{:09} {:>8} {:<20} ",
            self.event_name, self.cpu, secs, nsecs, self.pid, self.process_name
        )
    }
}
