use super::debug::DebugAttach;
use crate::flamegraph::FlamegraphConfig;
use crate::utils::config::{DEFAULT_TARGET_EVENT, DEFAULT_TARGET_SYMBOL};
use std::path::PathBuf;

/// Input path meaning "read records from stdin"
pub const STDIN_INPUT: &str = "-";

/// Arguments for the analyze command
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// JSON-lines record stream, `-` for stdin
    pub input: PathBuf,

    /// Symbol the call graph is rooted at
    pub target_symbol: String,

    /// Event type the call graph is built from
    pub target_event: String,

    /// Output path for JSON profile (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Flamegraph configuration
    pub flamegraph_config: FlamegraphConfig,

    /// Number of hot call paths to report
    pub top_paths: usize,

    /// Echo a header line per sample as it arrives
    pub print_samples: bool,

    /// Wait for a debugger before processing
    pub debug: Option<DebugAttach>,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(STDIN_INPUT),
            target_symbol: DEFAULT_TARGET_SYMBOL.to_string(),
            target_event: DEFAULT_TARGET_EVENT.to_string(),
            output_json: None,
            output_svg: None,
            flamegraph_config: FlamegraphConfig::default(),
            top_paths: 10,
            print_samples: false,
            debug: None,
        }
    }
}

impl AnalyzeArgs {
    pub fn reads_stdin(&self) -> bool {
        self.input.as_os_str() == STDIN_INPUT
    }
}
