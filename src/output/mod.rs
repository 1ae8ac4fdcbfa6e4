//! Output writers for analysis results.
//!
//! This module handles:
//! - The end-of-run text report on stdout
//! - JSON profiles (written and read back)
//! - SVG flamegraphs

pub mod json;
pub mod schema;
pub mod summary;
pub mod svg;

use crate::utils::error::OutputError;
use log::debug;
use std::path::Path;

// Re-export main functions
pub use json::{read_profile, write_profile};
pub use schema::{to_profile, EventTotal, GraphNode, HotPath, Profile};
pub use summary::{format_event_summary, format_hot_paths, format_ipc, print_report, render_report};
pub use svg::write_svg;

/// Validate that an output path is writable
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Create missing parent directories of `path`
fn ensure_parent_dir(path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!("Cannot create directory {}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}
