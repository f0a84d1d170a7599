//! Per-file conversion pipeline.
//!
//! Straight-line, sequential: discover → read → convert → map → write,
//! one file at a time, nothing shared between iterations. A failure on
//! one file is logged and counted, and the run moves on; only a bad root
//! aborts the whole run.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::convert::{Converter, Format};
use crate::discover;
use crate::mapping::MappingPolicy;

pub struct RunOptions {
    pub root: PathBuf,
    pub policy: MappingPolicy,
    pub from: Format,
    pub to: Format,
    /// List mapped outputs without reading, converting, or writing.
    pub dry_run: bool,
}

/// End-of-run report.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub converted: usize,
    pub failed: usize,
    /// True if the run stopped early on a cancellation request.
    pub interrupted: bool,
    pub outputs: Vec<PathBuf>,
}

/// Convert every candidate file under `opts.root`.
///
/// `cancel` is checked between files so an interrupt finishes the
/// in-flight file and then stops.
pub fn run(opts: &RunOptions, converter: &dyn Converter, cancel: &AtomicBool) -> Result<RunSummary> {
    let _span = tracing::info_span!("run", root = %opts.root.display()).entered();

    let source_ext = opts.from.extension();
    let mut summary = RunSummary::default();

    for input in discover::candidates(&opts.root, source_ext)? {
        if cancel.load(Ordering::SeqCst) {
            tracing::warn!("Interrupted, stopping before next file");
            summary.interrupted = true;
            break;
        }
        match process_file(&input, opts, converter) {
            Ok(output) => {
                summary.converted += 1;
                summary.outputs.push(output);
            }
            Err(e) => {
                tracing::warn!(path = %input.display(), error = %e, "Failed to convert");
                summary.failed += 1;
            }
        }
    }

    tracing::info!(
        converted = summary.converted,
        failed = summary.failed,
        "Run complete"
    );
    Ok(summary)
}

/// Read, convert, and write one file. Returns the output path.
fn process_file(input: &Path, opts: &RunOptions, converter: &dyn Converter) -> Result<PathBuf> {
    let _span = tracing::info_span!("process_file", path = %input.display()).entered();

    let output_path = opts.policy.output_path(input, opts.to);

    if opts.dry_run {
        tracing::info!(output = %output_path.display(), "Would convert");
        return Ok(output_path);
    }

    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let converted = converter
        .convert(&text, opts.from, opts.to)
        .with_context(|| format!("Conversion failed for {}", input.display()))?;

    let output_dir = output_path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir.display()))?;

    // Guard: same-dir policy with an .html target maps a file onto itself
    if let (Ok(src), Ok(dst)) = (
        dunce::canonicalize(input),
        dunce::canonicalize(output_dir).map(|d| {
            d.join(
                output_path
                    .file_name()
                    .unwrap_or_default(),
            )
        }),
    ) {
        if src == dst {
            anyhow::bail!(
                "Output would overwrite source file: {} (pick a different --policy or --to)",
                input.display()
            );
        }
    }

    if output_path.exists() {
        tracing::debug!(output = %output_path.display(), "Replacing existing output");
    }

    // Exactly one trailing newline, whatever the converter emitted
    let body = converted.trim_end_matches('\n');
    std::fs::write(&output_path, format!("{body}\n"))
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    tracing::info!(
        source = %input.display(),
        output = %output_path.display(),
        "Converted"
    );
    Ok(output_path)
}
