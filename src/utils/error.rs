//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading raw sample records
#[derive(Error, Debug)]
pub enum IngressError {
    #[error("Failed to read sample stream: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unhandled record shape: {0}")]
    UnhandledRecord(String),
}

/// Errors produced by derived metrics over the aggregated events
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("IPC undefined: no cycles or cycles:pp samples were recorded")]
    DivisionByZero,
}

/// Errors that can occur during flamegraph generation
#[derive(Error, Debug)]
pub enum FlamegraphError {
    #[error("Call graph is empty, no sample matched the target")]
    EmptyGraph,

    #[error("Failed to render flamegraph: {0}")]
    RenderFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
