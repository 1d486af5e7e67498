//! resim CLI: replays recorded sample logs against a simulation target.
//!
//! `resim replay --sample <path>` runs a sample and exits 0 on pass, 1 on
//! failure. `resim inspect <path>` summarizes a sample without replaying it.
//! Simulator-style plusargs (`+sample=<path>`, `+verbose`) are accepted too.

#![warn(missing_docs)]

mod inspect;
mod logging;
mod plusargs;
mod replay;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// resim: sample-driven regression replay.
#[derive(Parser, Debug)]
#[command(name = "resim", version, about = "Sample-driven RTL regression replay")]
pub struct Cli {
    /// Suppress all output except errors and warnings.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Trace every replayed command.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a custom `resim.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a sample log and report PASS/FAIL.
    Replay(ReplayArgs),
    /// Summarize a sample log without replaying it.
    Inspect(InspectArgs),
}

/// Arguments for the `resim replay` subcommand.
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Sample log to replay (plain text or `.gz`).
    #[arg(long)]
    pub sample: String,

    /// Output format for the run report.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `resim inspect` subcommand.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Sample log to summarize.
    pub path: String,

    /// Output format for the summary.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to trace replayed commands.
    pub verbose: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse_from(plusargs::translate(std::env::args()));

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Replay(ref args) => replay::run(args, &global),
        Command::Inspect(ref args) => inspect::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
