//! perf-cccost
//!
//! Call-chain cost analysis for hardware performance-counter samples
//! recorded by `perf`.
//!
//! Samples are consumed one at a time and reduced into two views:
//! - Per-event-type totals, from which instructions-per-cycle is derived
//! - A weighted call graph rooted at one target symbol, showing which
//!   call chains accumulated the most sampled cycles there
//!
//! ## Getting Started
//!
//! ```bash
//! perf script -F ... | cccost analyze --symbol native_queued_spin_lock_slowpath
//! cccost --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod flamegraph;
pub mod ingress;
pub mod output;
pub mod utils;
