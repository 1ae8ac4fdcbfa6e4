use crate::output::read_profile;
use anyhow::Result;
use std::path::PathBuf;

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: PathBuf) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let profile = read_profile(&file_path)?;

    println!("✓ Valid profile JSON");
    println!("  Version: {}", profile.version);
    println!("  Target: {} ({})", profile.target_symbol, profile.target_event);
    println!("  Event Types: {}", profile.events.len());
    match profile.ipc {
        Some(ipc) => println!("  IPC: {:.3}", ipc),
        None => println!("  IPC: n/a"),
    }
    println!(
        "  Call Graph Weight: {}",
        profile.call_graph.as_ref().map_or(0, |root| root.weight)
    );
    println!("  Hot Paths: {}", profile.hot_paths.len());

    Ok(())
}
