//! cccost CLI
//!
//! Reduces a stream of perf samples into event totals, IPC and a call
//! graph rooted at one symbol.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::net::IpAddr;
use std::path::PathBuf;

use perf_cccost::commands::{
    execute_analyze, validate_args, validate_profile_file, AnalyzeArgs, DebugAttach,
};
use perf_cccost::flamegraph::FlamegraphConfig;
use perf_cccost::utils::config::{
    DEFAULT_DEBUG_IP, DEFAULT_DEBUG_PORT, DEFAULT_TARGET_EVENT, DEFAULT_TARGET_SYMBOL,
};

/// cccost - call-chain cost of a symbol in perf samples
#[derive(Parser, Debug)]
#[command(name = "cccost")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a JSON-lines sample stream
    Analyze {
        /// Record stream, one JSON object per line (`-` for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Symbol to parse and analyze
        #[arg(short, long, default_value = DEFAULT_TARGET_SYMBOL)]
        symbol: String,

        /// Event type to analyze
        #[arg(short, long, default_value = DEFAULT_TARGET_EVENT)]
        event_type: String,

        /// Wait for a debugger before processing
        #[arg(short, long)]
        debug: bool,

        /// Debugger listen ip address
        #[arg(short = 'l', long, default_value = DEFAULT_DEBUG_IP)]
        debug_ip: IpAddr,

        /// Debugger listen port
        #[arg(short = 'p', long, default_value_t = DEFAULT_DEBUG_PORT)]
        debug_port: u16,

        /// Output path for JSON profile (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG flamegraph (optional)
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// Number of hot call paths to report
        #[arg(long, default_value = "10")]
        top_paths: usize,

        /// Print a header line for every sample
        #[arg(long)]
        print_samples: bool,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Analyze {
            input,
            symbol,
            event_type,
            debug,
            debug_ip,
            debug_port,
            output,
            flamegraph,
            title,
            width,
            top_paths,
            print_samples,
        } => {
            let mut fg_config = FlamegraphConfig::new()
                .with_width(width)
                .with_count_name(event_type.clone());
            if let Some(title) = title {
                fg_config = fg_config.with_title(title);
            }

            let args = AnalyzeArgs {
                input,
                target_symbol: symbol,
                target_event: event_type,
                output_json: output,
                output_svg: flamegraph,
                flamegraph_config: fg_config,
                top_paths,
                print_samples,
                debug: debug.then(|| DebugAttach::new(debug_ip, debug_port)),
            };

            validate_args(&args)?;
            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(file)?;
        }
    }

    Ok(())
}
