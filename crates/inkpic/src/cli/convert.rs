//! The `inkpic convert` command: batch-convert a photo tree into frame bitmaps.

use anyhow::Context;
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use inkpic_core::output::OutputFormat as CoreOutputFormat;
use inkpic_core::pipeline::FileDiscovery;
use inkpic_core::{BatchConverter, BatchSummary, Config, FileOutcome, OutputWriter};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Arguments for the `convert` command.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Directory tree to read photos from
    #[arg(long)]
    pub source: PathBuf,

    /// Directory the numbered bitmaps are written to (created if missing)
    #[arg(long)]
    pub dest: PathBuf,

    /// Shuffle seed, for a reproducible order
    #[arg(long, env = "INKPIC_SEED")]
    pub seed: Option<u64>,

    /// Stop at the first photo that fails to convert
    #[arg(long)]
    pub fail_fast: bool,

    /// Write a report of the source to destination assignment to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "json")]
    pub report_format: ReportFormat,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Supported report formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Single JSON object
    Json,
    /// One JSON object per file
    Jsonl,
}

impl From<ReportFormat> for CoreOutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => CoreOutputFormat::Json,
            ReportFormat::Jsonl => CoreOutputFormat::JsonLines,
        }
    }
}

/// Execute the convert command.
pub fn execute(args: ConvertArgs, mut config: Config) -> anyhow::Result<()> {
    if args.seed.is_some() {
        config.processing.seed = args.seed;
    }
    config.processing.fail_fast |= args.fail_fast;

    let mut converter = BatchConverter::from_config(&config);
    let files = converter.processor().discover(&args.source);
    if files.is_empty() {
        tracing::warn!("No supported photos found in {:?}", args.source);
    }
    let total_bytes = FileDiscovery::total_size(&files);

    let progress = if args.no_progress {
        ProgressBar::hidden()
    } else {
        create_progress_bar(files.len() as u64)
    };

    let result = converter.run(files, &args.dest, |outcome| {
        progress.inc(1);
        if let FileOutcome::Converted(file) = outcome {
            if let Some(name) = file.destination.file_name() {
                progress.set_message(name.to_string_lossy().into_owned());
            }
        }
    });
    progress.finish_and_clear();

    let summary = result.context("Batch aborted")?;
    print_summary(&summary, total_bytes);

    if let Some(path) = &args.report {
        write_report(path, &summary, args.report_format.into())?;
        tracing::info!("Report written to {:?}", path);
    }

    if !summary.is_complete() {
        anyhow::bail!(
            "{} of {} photos failed to convert",
            summary.failed.len(),
            summary.failed.len() + summary.succeeded()
        );
    }
    Ok(())
}

fn write_report(
    path: &Path,
    summary: &BatchSummary,
    format: CoreOutputFormat,
) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file {}", path.display()))?;
    let mut writer = OutputWriter::new(BufWriter::new(file), format, true);
    writer.write_summary(summary)?;
    writer.flush()?;
    Ok(())
}

/// Create a progress bar for batch conversion.
fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar().template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
    ) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb.set_message("starting...");
    pb
}

/// Print a formatted summary table after the batch.
fn print_summary(summary: &BatchSummary, total_bytes: u64) {
    let succeeded = summary.succeeded();
    let failed = summary.failed.len();
    let mb_read = total_bytes as f64 / 1_000_000.0;
    let throughput = if summary.total_seconds > 0.0 {
        mb_read / summary.total_seconds
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Converted:    {:>8}", succeeded);
    if failed > 0 {
        eprintln!("    Failed:       {:>8}", failed);
    }
    eprintln!("  ------------------------------------");
    eprintln!("    Total:        {:>8}", succeeded + failed);
    eprintln!("    Duration:     {:>7.1}s", summary.total_seconds);
    eprintln!("    Rate:         {:>7.1} img/sec", summary.images_per_second());
    eprintln!("    Throughput:   {:>7.1} MB/sec", throughput);
    eprintln!("  ====================================");

    for file in &summary.failed {
        eprintln!("    [{}] {}", file.kind, file.source.display());
    }
}
