//! Scan command - extract ledger rows from one receipt's OCR text.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use grocer_core::ledger::{CsvSink, RecordSink};
use grocer_core::receipt::rules::format_price;
use grocer_core::{GrocerConfig, ParseStrategy, ReceiptPipeline, Scan, ScanOutcome};

use super::load_config;

/// Arguments for the scan command.
#[derive(Args)]
pub struct ScanArgs {
    /// OCR text file, or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Layout of the OCR text (default: from config)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Store name (default: guessed from the first line)
    #[arg(long)]
    store: Option<String>,

    /// Receipt date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Append rows to a CSV ledger (default path: ledger.ledger_path from config)
    #[arg(long, num_args = 0..=1, value_name = "LEDGER")]
    append: Option<Option<PathBuf>>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV ledger rows
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum StrategyArg {
    /// Name line followed by a $price line
    Split,
    /// Name and price on one line
    Inline,
    /// Last whitespace token is the price
    Whitespace,
    /// Try split, inline, whitespace in turn
    Auto,
}

impl From<StrategyArg> for ParseStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Split => ParseStrategy::Split,
            StrategyArg::Inline => ParseStrategy::Inline,
            StrategyArg::Whitespace => ParseStrategy::Whitespace,
            StrategyArg::Auto => ParseStrategy::Auto,
        }
    }
}

pub async fn run(args: ScanArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(strategy) = args.strategy {
        config.parser.strategy = strategy.into();
    }

    let text = read_input(&args.input).await?;
    info!("Read {} characters of OCR text", text.len());

    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let pipeline = ReceiptPipeline::from_config(&config);

    let scan = match pipeline.scan(text, args.store.as_deref(), date)? {
        ScanOutcome::Items(scan) => scan,
        ScanOutcome::NoItemsDetected { lines } => {
            eprintln!(
                "{} No items detected in {} lines of OCR text.",
                style("⚠").yellow(),
                lines
            );
            return Ok(());
        }
    };

    let output = format_scan(&scan, args.format)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output.trim_end());
    }

    if let Some(append) = args.append {
        let ledger = ledger_path(append, &config)?;
        let count = append_to_ledger(&ledger, scan.into_records())?;
        eprintln!(
            "{} Appended {} rows to {}",
            style("✓").green(),
            count,
            ledger.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Read OCR text from a file, or stdin for "-".
pub async fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    Ok(tokio::fs::read_to_string(path).await?)
}

pub fn ledger_path(flag: Option<PathBuf>, config: &GrocerConfig) -> anyhow::Result<PathBuf> {
    match flag.or_else(|| config.ledger.ledger_path.clone()) {
        Some(path) => Ok(path),
        None => anyhow::bail!(
            "No ledger path given. Pass --append <LEDGER> or run 'grocer config set ledger.ledger_path <PATH>'."
        ),
    }
}

pub fn append_to_ledger(path: &Path, records: Vec<grocer_core::ReceiptRecord>) -> anyhow::Result<usize> {
    let mut sink = CsvSink::open_append(path)?;
    Ok(sink.append(records)?)
}

pub fn format_scan(scan: &Scan, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(scan)?),
        OutputFormat::Csv => format_csv(scan),
        OutputFormat::Text => Ok(format_text(scan)),
    }
}

fn format_csv(scan: &Scan) -> anyhow::Result<String> {
    let mut sink = CsvSink::new(Vec::new(), true)?;
    sink.append(scan.records.clone())?;
    Ok(String::from_utf8(sink.into_inner()?)?)
}

fn format_text(scan: &Scan) -> String {
    let mut output = String::new();

    output.push_str(&format!("Store: {}\n", scan.store));
    if let Some(first) = scan.records.first() {
        output.push_str(&format!("Date: {} ({})\n", first.date(), first.day()));
    }
    output.push_str(&format!("Layout: {}\n", scan.strategy));
    output.push('\n');

    let width = scan
        .records
        .iter()
        .map(|r| r.item.chars().count())
        .max()
        .unwrap_or(0);

    for record in &scan.records {
        output.push_str(&format!(
            "  {:<width$}  {:>9}  {}\n",
            record.item,
            format_price(record.price),
            record.category,
            width = width
        ));
    }

    let total = scan
        .total()
        .map(format_price)
        .unwrap_or_else(|| "overflow".to_string());
    output.push('\n');
    output.push_str(&format!("Items: {}  Total: {}\n", scan.records.len(), total));
    if scan.excluded > 0 {
        output.push_str(&format!("Skipped {} tax/total/payment lines\n", scan.excluded));
    }

    output
}
