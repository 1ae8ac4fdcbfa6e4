//! Sample ingress.
//!
//! This module handles:
//! - The raw record shape handed over by perf script
//! - Normalizing records into immutable `Sample`s
//! - Replaying a recorded JSON-lines stream one sample at a time

pub mod record;
pub mod replay;
pub mod sample;

// Re-export main types
pub use record::{RawCallchainEntry, RawRecord, RawSampleFields, RawSymbol};
pub use replay::{describe_unhandled, replay, ReplayStats};
pub use sample::{Frame, FrameKey, Sample};
