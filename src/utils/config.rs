//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default symbol the call graph is rooted at (kernel lock contention)
pub const DEFAULT_TARGET_SYMBOL: &str = "native_queued_spin_lock_slowpath";

/// Default event type the call graph is built for
pub const DEFAULT_TARGET_EVENT: &str = "cycles:pp";

// Substituted when perf could not resolve the leaf frame
pub const UNKNOWN_SYMBOL: &str = "Unknown_symbol";
pub const UNKNOWN_DSO: &str = "Unknown_dso";

// Event names consulted for IPC, in fallback order
pub const INSTRUCTION_EVENTS: &[&str] = &["instructions", "instructions:pp"];
pub const CYCLE_EVENTS: &[&str] = &["cycles", "cycles:pp"];

/// Column width of the event name in the summary table
pub const EVENT_NAME_WIDTH: usize = 20;

/// Column width of the event total in the summary table
pub const EVENT_TOTAL_WIDTH: usize = 8;

/// Indentation emitted per call graph level
pub const GRAPH_INDENT: &str = "  ";

// Debug attach defaults
pub const DEFAULT_DEBUG_IP: &str = "127.0.0.1";
pub const DEFAULT_DEBUG_PORT: u16 = 5678;

/// Upper bound for `--top-paths`
pub const MAX_TOP_PATHS: usize = 1000;
