//! Process command - reconstruct a receipt from a single OCR document.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info, warn};

use rcpt_core::models::config::RcptConfig;
use rcpt_core::{Fragment, HeuristicReconstructor, OcrDocument, Receipt, ReceiptReconstructor};

use super::{load_config, write_output};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input OCR document (Textract response or line list JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Wrap JSON output with the ordered OCR lines and the input source
    #[arg(long)]
    envelope: bool,

    /// Append arithmetic consistency anomalies
    #[arg(long)]
    cross_validate: bool,

    /// Row tolerance for reading order (overrides config)
    #[arg(long)]
    row_tolerance: Option<f64>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// OCR half of the envelope: the lines in reading order.
#[derive(Serialize)]
struct OcrSummary<'a> {
    page_count: u32,
    lines: Vec<&'a Fragment>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    ocr: OcrSummary<'a>,
    receipt: &'a Receipt,
    source: String,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);

    pb.set_message("Loading OCR document...");
    let content = fs::read_to_string(&args.input)?;
    let document = OcrDocument::from_json(&content)?;
    debug!(
        "Document has {} pages and {} lines",
        document.page_count,
        document.lines.len()
    );
    if document.is_empty() {
        warn!("{} contains no text lines", args.input.display());
    }

    pb.set_message("Reconstructing receipt...");
    let reconstructor = build_reconstructor(&config, args.cross_validate, args.row_tolerance);
    let receipt = reconstructor.reconstruct(&document, None)?;

    pb.finish_and_clear();

    if !receipt.anomalies.is_empty() {
        eprintln!("{}", style("Consistency issues:").yellow());
        for anomaly in &receipt.anomalies {
            eprintln!("  - {}", anomaly);
        }
    }

    let output = if args.envelope {
        if !matches!(args.format, OutputFormat::Json) {
            warn!("--envelope only applies to JSON output; ignoring it");
            format_receipt(&receipt, args.format, &config)?
        } else {
            let envelope = Envelope {
                ocr: OcrSummary {
                    page_count: document.page_count,
                    lines: document
                        .ordered(reconstructor_tolerance(&config, args.row_tolerance))
                        .iter()
                        .collect(),
                },
                receipt: &receipt,
                source: args.input.display().to_string(),
            };
            to_json(&envelope, config.output.pretty)?
        }
    } else {
        format_receipt(&receipt, args.format, &config)?
    };

    if let Some(output_path) = &args.output {
        let written = write_output(output_path, &output)?;
        println!(
            "{} Wrote {} bytes to {}",
            style("✓").green(),
            written,
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build the reconstructor from config plus command-line overrides.
pub fn build_reconstructor(
    config: &RcptConfig,
    cross_validate: bool,
    row_tolerance: Option<f64>,
) -> HeuristicReconstructor {
    let reconstructor = HeuristicReconstructor::from_config(config)
        .with_row_tolerance(reconstructor_tolerance(config, row_tolerance));
    if cross_validate {
        reconstructor.with_cross_validation(true)
    } else {
        reconstructor
    }
}

fn reconstructor_tolerance(config: &RcptConfig, row_tolerance: Option<f64>) -> f64 {
    row_tolerance
        .filter(|t| t.is_finite() && *t >= 0.0)
        .unwrap_or(config.ordering.row_tolerance)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    Ok(if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    })
}

pub fn format_receipt(
    receipt: &Receipt,
    format: OutputFormat,
    config: &RcptConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => to_json(receipt, config.output.pretty),
        OutputFormat::Csv => format_csv(receipt),
        OutputFormat::Text => Ok(format_text(receipt)),
    }
}

fn format_csv(receipt: &Receipt) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "vendor", "date", "item", "qty", "price", "subtotal", "tax", "total",
    ])?;

    let subtotal = receipt.subtotal.to_string();
    let tax = receipt.tax.to_string();
    let total = receipt.total.to_string();

    if receipt.items.is_empty() {
        wtr.write_record([
            receipt.vendor.as_str(),
            receipt.date.as_str(),
            "",
            "",
            "",
            subtotal.as_str(),
            tax.as_str(),
            total.as_str(),
        ])?;
    }

    for item in &receipt.items {
        let qty = item.qty.to_string();
        let price = item.price.to_string();
        wtr.write_record([
            receipt.vendor.as_str(),
            receipt.date.as_str(),
            item.name.as_str(),
            qty.as_str(),
            price.as_str(),
            subtotal.as_str(),
            tax.as_str(),
            total.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(receipt: &Receipt) -> String {
    let mut output = String::new();

    let vendor = if receipt.vendor.is_empty() {
        "(unknown)"
    } else {
        receipt.vendor.as_str()
    };
    output.push_str(&format!("Vendor: {}\n", vendor));
    if !receipt.date.is_empty() {
        output.push_str(&format!("Date: {}\n", receipt.date));
    }
    output.push('\n');

    output.push_str("Items:\n");
    if receipt.items.is_empty() {
        output.push_str("  (none)\n");
    }
    for item in &receipt.items {
        output.push_str(&format!("  {} x{}  {}\n", item.name, item.qty, item.price));
    }
    output.push('\n');

    output.push_str(&format!("Subtotal: {}\n", receipt.subtotal));
    output.push_str(&format!("Tax:      {}\n", receipt.tax));
    output.push_str(&format!("Total:    {}\n", receipt.total));

    if !receipt.anomalies.is_empty() {
        output.push_str("\nAnomalies:\n");
        for anomaly in &receipt.anomalies {
            output.push_str(&format!("  - {}\n", anomaly));
        }
    }

    output
}
