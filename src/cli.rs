//! CLI implementation for treeconv

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use treeconv::convert::{Format, PandocConverter};
use treeconv::mapping::MappingPolicy;
use treeconv::pipeline::{self, RunOptions, RunSummary};

// Exit codes
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    GeneralError = 1,
    PartialFailure = 2,
    Interrupted = 130,
}

// Signal handling
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

fn setup_signal_handler() {
    ctrlc::set_handler(|| {
        if INTERRUPTED.swap(true, Ordering::SeqCst) {
            // Second Ctrl+C: force exit
            std::process::exit(ExitCode::Interrupted as i32);
        }
        eprintln!("\nInterrupted. Finishing current file...");
    })
    .expect("Failed to set Ctrl+C handler");
}

#[derive(Parser)]
#[command(name = "treeconv")]
#[command(about = "Convert a tree of HTML documentation to reStructuredText")]
#[command(version)]
pub struct Cli {
    /// Root directory to scan for .html files
    root: PathBuf,

    /// Where converted files are written
    #[arg(long, value_enum, default_value = "same-dir")]
    policy: MappingPolicy,

    /// Target format
    #[arg(long, value_enum, default_value = "rst")]
    to: Format,

    /// Converter executable honoring pandoc's -f/-t stdin/stdout contract
    #[arg(long, env = "TREECONV_PANDOC", default_value = "pandoc")]
    pandoc: String,

    /// List mapped outputs without converting or writing
    #[arg(long)]
    dry_run: bool,

    /// Output the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Suppress the human-readable summary
    #[arg(short, long)]
    quiet: bool,

    /// Show debug info (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Log to stderr to keep stdout clean for the summary
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    setup_signal_handler();

    let opts = RunOptions {
        root: cli.root.clone(),
        policy: cli.policy,
        from: Format::Html,
        to: cli.to,
        dry_run: cli.dry_run,
    };
    let converter = PandocConverter::new(cli.pandoc.clone());

    let summary = pipeline::run(&opts, &converter, &INTERRUPTED)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !cli.quiet {
        print_summary(&cli, &summary);
    }

    match exit_code(&summary) {
        ExitCode::Success => Ok(()),
        code => std::process::exit(code as i32),
    }
}

fn exit_code(summary: &RunSummary) -> ExitCode {
    if summary.interrupted {
        ExitCode::Interrupted
    } else if summary.failed > 0 {
        ExitCode::PartialFailure
    } else {
        ExitCode::Success
    }
}

fn print_summary(cli: &Cli, summary: &RunSummary) {
    if summary.converted == 0 && summary.failed == 0 {
        println!("No .html files found.");
        return;
    }

    if cli.dry_run {
        println!(
            "Dry run — {} file(s) would be converted:\n",
            summary.outputs.len()
        );
    } else if summary.failed > 0 {
        println!(
            "Converted {} file(s), {} failed:\n",
            summary.converted.to_string().green(),
            summary.failed.to_string().red()
        );
    } else {
        println!(
            "Converted {} file(s):\n",
            summary.converted.to_string().green()
        );
    }

    for output in &summary.outputs {
        println!("  {}", output.display());
    }
}
