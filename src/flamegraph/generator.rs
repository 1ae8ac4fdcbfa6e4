//! SVG flamegraph generation from the call graph.

use crate::aggregator::{build_collapsed_stacks, CallGraph, CollapsedStack};
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Options};
use log::info;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    /// Unit shown in frame tooltips
    pub count_name: String,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Call Chain Cost".to_string(),
            width: 1200,
            count_name: "cycles".to_string(),
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_count_name(mut self, count_name: impl Into<String>) -> Self {
        self.count_name = count_name.into();
        self
    }
}

/// Generate an SVG flamegraph of the call graph
///
/// # Errors
/// * `FlamegraphError::EmptyGraph` - no sample matched the target
/// * `FlamegraphError::RenderFailed` - inferno failed to render
/// * `FlamegraphError::IoError` - rendered SVG was not valid UTF-8
pub fn generate_flamegraph(
    graph: &CallGraph,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    let stacks = build_collapsed_stacks(graph);
    if stacks.is_empty() {
        return Err(FlamegraphError::EmptyGraph);
    }

    let config = config.cloned().unwrap_or_default();
    info!("Generating flamegraph with {} stacks", stacks.len());

    let lines: Vec<String> = stacks.iter().map(CollapsedStack::to_line).collect();

    let mut options = Options::default();
    options.title = config.title;
    options.count_name = config.count_name;
    options.image_width = Some(config.width);

    let mut svg = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut svg)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg = String::from_utf8(svg)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    info!("Flamegraph generated successfully ({} bytes)", svg.len());
    Ok(svg)
}
