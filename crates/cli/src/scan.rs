use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result, bail};
use btrdex_fs::{ProbeOutcome, RecordStore, ScanSummary, crawl, probe};
use btrdex_runtime::{FORMAT_TAG, SilentWriter, StatusWriter, StderrWriter};
use chrono::Utc;
use clap::Args;
use log::{debug, info, warn};

use crate::printer::{OutputFormat, ScanPrintContext, format_timestamp};

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root directory to inventory
    pub path: PathBuf,

    /// Output format
    #[arg(long, short = 'f', value_enum, value_name = "FORMAT", default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Skip btrfs detection and crawl directly
    #[arg(long)]
    pub no_probe: bool,

    /// Suppress progress lines on stderr
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

pub fn run(args: ScanArgs) -> ExitCode {
    let mut status: Box<dyn StatusWriter> = if args.quiet {
        Box::new(SilentWriter)
    } else {
        Box::new(StderrWriter)
    };

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());

    match execute(&args, out, status.as_mut()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

/// Validate the root, gather records and render them to `out`.
///
/// Nothing is written to `out` unless gathering succeeded.
pub fn execute<W: Write>(
    args: &ScanArgs,
    out: W,
    status: &mut dyn StatusWriter,
) -> Result<ScanSummary> {
    validate_root(&args.path)?;

    let scan_time = Utc::now();
    let store = gather(&args.path, !args.no_probe, status)?;

    let summary = store.summary();
    let _ = status.write_status(&format!("Completed! Found {} files.", store.len()));
    info!(
        "[scan] {} entries: {} directories, {} files, {} bytes, latest mtime {}",
        summary.entries,
        summary.directories,
        summary.files,
        summary.total_bytes,
        summary
            .latest_mtime
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_owned()),
    );

    let ctx = ScanPrintContext {
        scan_time,
        format_tag: FORMAT_TAG,
    };

    args.format
        .make_printer(out)
        .print(&store, &ctx)
        .context("failed to write output")?;

    Ok(summary)
}

fn validate_root(path: &Path) -> Result<()> {
    let meta =
        fs::metadata(path).with_context(|| format!("Cannot access {}", path.display()))?;

    if !meta.is_dir() {
        bail!("{} is not a directory.", path.display());
    }

    Ok(())
}

/// Populate a fresh store for `root`.
///
/// A successful probe only selects the diagnostic: native tree iteration is
/// not available, so the crawler is always the population path.
fn gather(root: &Path, use_probe: bool, status: &mut dyn StatusWriter) -> Result<RecordStore> {
    if use_probe {
        match probe(root) {
            ProbeOutcome::Native(info) => {
                debug!("[scan] btrfs fsid {}", info.fsid_string());
                warn!(
                    "[scan] direct metadata access unavailable for {}, falling back to filesystem crawl",
                    root.display()
                );
            }
            ProbeOutcome::Fallback(reason) => {
                info!("[scan] {}: {reason}; using filesystem crawl", root.display());
            }
        }
    } else {
        debug!("[scan] probe disabled");
    }

    let mut store = RecordStore::new();
    crawl(root, &mut store, status).context("Failed to process filesystem")?;

    Ok(store)
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
