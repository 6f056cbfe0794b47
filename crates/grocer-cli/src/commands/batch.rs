//! Batch processing command for many receipt text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use grocer_core::{ReceiptPipeline, Scan, ScanOutcome};

use super::load_config;
use super::scan::{append_to_ledger, format_scan, ledger_path, OutputFormat, StrategyArg};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Layout of the OCR text (default: from config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Receipt date applied to every file as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Append all rows to a CSV ledger (default path: ledger.ledger_path from config)
    #[arg(long, num_args = 0..=1, value_name = "LEDGER")]
    append: Option<Option<PathBuf>>,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    outcome: Option<ScanOutcome>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl ProcessResult {
    fn scan(&self) -> Option<&Scan> {
        self.outcome.as_ref().and_then(ScanOutcome::scan)
    }

    fn status(&self) -> &'static str {
        match &self.outcome {
            Some(ScanOutcome::Items(_)) => "success",
            Some(ScanOutcome::NoItemsDetected { .. }) => "empty",
            None => "error",
        }
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.parser.strategy = strategy.into();
    }

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let pipeline = ReceiptPipeline::from_config(&config);

    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &pipeline, date);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(outcome) => results.push(ProcessResult {
                path,
                outcome: Some(outcome),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        outcome: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed for {}: {}", path.display(), error_msg);
                }
            }
        }

        progress.inc(1);
    }

    progress.finish_with_message("Complete");

    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            let Some(scan) = result.scan() else {
                continue;
            };
            let output_name = result
                .path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("receipt");
            let output_path =
                output_dir.join(format!("{}.{}", output_name, args.format.extension()));

            fs::write(&output_path, format_scan(scan, args.format)?)?;
            debug!("Wrote output to {}", output_path.display());
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    if let Some(append) = args.append {
        let ledger = ledger_path(append, &config)?;
        let records: Vec<_> = results
            .iter()
            .filter_map(ProcessResult::scan)
            .flat_map(|scan| scan.records.iter().cloned())
            .collect();
        let count = append_to_ledger(&ledger, records)?;
        println!(
            "{} Appended {} rows to {}",
            style("✓").green(),
            count,
            ledger.display()
        );
    }

    let successful = results.iter().filter(|r| r.status() == "success").count();
    let empty: Vec<_> = results.iter().filter(|r| r.status() == "empty").collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} without items, {} failed",
        style(successful).green(),
        style(empty.len()).yellow(),
        style(failed.len()).red()
    );

    if !empty.is_empty() {
        println!();
        println!("{}", style("No items detected:").yellow());
        for result in &empty {
            println!("  - {}", result.path.display());
        }
    }

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn process_single_file(
    path: &Path,
    pipeline: &ReceiptPipeline,
    date: NaiveDate,
) -> anyhow::Result<ScanOutcome> {
    let text = fs::read_to_string(path)?;
    Ok(pipeline.scan(text, None, date)?)
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "store",
        "items",
        "total",
        "excluded",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let time = result.processing_time_ms.to_string();

        if let Some(scan) = result.scan() {
            let total = scan
                .total()
                .map(|total| format!("{:.2}", total))
                .unwrap_or_default();
            wtr.write_record([
                filename,
                result.status(),
                &scan.store,
                &scan.records.len().to_string(),
                &total,
                &scan.excluded.to_string(),
                &time,
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                result.status(),
                "",
                "0",
                "",
                "",
                &time,
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
