//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod debug;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, run_session, validate_args};
pub use debug::DebugAttach;
pub use models::{AnalyzeArgs, STDIN_INPUT};
pub use utils::validate_profile_file;
