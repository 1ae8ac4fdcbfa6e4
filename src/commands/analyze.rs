//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Optionally waits for a debugger
//! 2. Replays the record stream through a `Session`
//! 3. Builds collapsed stacks and hot paths
//! 4. Prints the text report
//! 5. Writes the optional JSON profile and SVG flamegraph

use super::models::AnalyzeArgs;
use crate::aggregator::{build_collapsed_stacks, calculate_hot_paths, Report, Session};
use crate::flamegraph::generate_flamegraph;
use crate::ingress::replay;
use crate::output::{print_report, to_profile, write_profile, write_svg};
use crate::utils::config::MAX_TOP_PATHS;
use crate::utils::error::FlamegraphError;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::time::Instant;

/// Execute the analyze command
///
/// # Errors
/// * Input cannot be opened or read
/// * Debugger listener cannot be bound
/// * Output files cannot be written
pub fn execute_analyze(args: AnalyzeArgs) -> Result<Report> {
    let start_time = Instant::now();

    info!(
        "Analyzing {} for symbol {} ({})",
        args.input.display(),
        args.target_symbol,
        args.target_event
    );

    if let Some(attach) = &args.debug {
        attach
            .wait_for_client()
            .with_context(|| format!("Failed to wait for debugger on {}", attach.socket_addr()))?;
    }

    let reader = open_input(&args)?;
    let report = run_session(reader, &mut io::stdout(), &args)?;

    let stacks = build_collapsed_stacks(&report.call_graph);
    let hot_paths = calculate_hot_paths(&stacks, report.call_graph.total_weight(), args.top_paths);
    debug!("Top {} of {} stacks selected as hot paths", hot_paths.len(), stacks.len());

    print_report(&report, &hot_paths);

    if let Some(path) = &args.output_json {
        let profile = to_profile(&report, hot_paths.clone());
        write_profile(&profile, path).context("Failed to write profile JSON")?;
        info!("✓ Profile written to: {}", path.display());
    }

    if let Some(svg_path) = &args.output_svg {
        match generate_flamegraph(&report.call_graph, Some(&args.flamegraph_config)) {
            Ok(svg) => {
                write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
                info!("✓ Flamegraph written to: {}", svg_path.display());
            }
            Err(FlamegraphError::EmptyGraph) => {
                warn!(
                    "No {} sample hit {}, skipping flamegraph",
                    args.target_event, args.target_symbol
                );
            }
            Err(e) => return Err(e).context("Failed to generate flamegraph"),
        }
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(report)
}

/// Feed every record of `reader` through a fresh session and finalize it.
///
/// Unhandled records are echoed to `echo`.
pub fn run_session<R, W>(reader: R, echo: &mut W, args: &AnalyzeArgs) -> Result<Report>
where
    R: BufRead,
    W: Write,
{
    let mut session = Session::new(args.target_symbol.clone(), args.target_event.clone());
    let print_samples = args.print_samples;

    let stats = replay(reader, echo, |sample| {
        if print_samples {
            println!("{}{} ({})", sample.header_line(), sample.symbol, sample.module);
        }
        session.process(sample);
    })
    .context("Failed to read sample stream")?;

    info!("Processed {} samples ({} unhandled records)", stats.samples, stats.unhandled);
    session.note_unhandled(stats.unhandled);

    Ok(session.finalize())
}

fn open_input(args: &AnalyzeArgs) -> Result<Box<dyn BufRead>> {
    if args.reads_stdin() {
        debug!("Reading records from stdin");
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file = File::open(&args.input)
        .with_context(|| format!("Failed to open input {}", args.input.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

/// Validate analyze arguments
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if args.target_symbol.is_empty() {
        anyhow::bail!("Target symbol cannot be empty");
    }

    if args.target_event.is_empty() {
        anyhow::bail!("Target event type cannot be empty");
    }

    if !args.reads_stdin() {
        // Pipes and process substitution are not regular files
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        if args.input.is_dir() {
            anyhow::bail!("Input is a directory: {}", args.input.display());
        }
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > MAX_TOP_PATHS {
        anyhow::bail!("top_paths is too large (max {})", MAX_TOP_PATHS);
    }

    if args.flamegraph_config.width == 0 {
        anyhow::bail!("Flamegraph width must be greater than 0");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_defaults() {
        assert!(validate_args(&AnalyzeArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_symbol() {
        let args = AnalyzeArgs {
            target_symbol: String::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_missing_input() {
        let args = AnalyzeArgs {
            input: PathBuf::from("/nonexistent/perf.jsonl"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_input_kinds() {
        let temp_dir = tempfile::tempdir().unwrap();
        let dir = AnalyzeArgs {
            input: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_args(&dir).is_err());

        let file = tempfile::NamedTempFile::new().unwrap();
        let regular = AnalyzeArgs {
            input: file.path().to_path_buf(),
            ..Default::default()
        };
        assert!(validate_args(&regular).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_args_accepts_character_device() {
        // Streams such as /dev/stdin or a FIFO are not regular files
        let args = AnalyzeArgs {
            input: PathBuf::from("/dev/null"),
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_top_paths_bounds() {
        let zero = AnalyzeArgs {
            top_paths: 0,
            ..Default::default()
        };
        let huge = AnalyzeArgs {
            top_paths: 2000,
            ..Default::default()
        };
        assert!(validate_args(&zero).is_err());
        assert!(validate_args(&huge).is_err());
    }

    #[test]
    fn test_run_session_counts_unhandled() {
        let input = concat!(
            r#"{"ev_name": "cycles:pp", "symbol": "foo", "sample": {"period": 4}}"#,
            "\n",
            r#"{"comm": "sh"}"#,
            "\n"
        );
        let args = AnalyzeArgs {
            target_symbol: "foo".to_string(),
            ..Default::default()
        };
        let mut echo = Vec::new();

        let report = run_session(Cursor::new(input), &mut echo, &args).unwrap();

        assert_eq!(report.unhandled_records, 1);
        assert_eq!(report.call_graph.total_weight(), 4);
        assert_eq!(String::from_utf8(echo).unwrap(), "comm=sh\n");
    }
}
