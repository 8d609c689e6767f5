//! Batch command - parse many receipt files and summarise spend.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use billscan_core::{format_inr, source, Category, ParsedRecord, ReceiptParser, SourceConfig};

use super::{format_record, load_config, OutputFormat, SavedRecord};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching input files
    #[arg(required = true)]
    input: String,

    /// Output directory for per-file records
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write summary.csv
    #[arg(long)]
    summary: bool,

    /// Number of files parsed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Keep going when a file fails
    #[arg(long)]
    continue_on_error: bool,
}

/// Outcome of parsing one file.
struct FileResult {
    path: PathBuf,
    record: Option<ParsedRecord>,
    error: Option<String>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| source::is_supported(p))
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(output_dir) = &args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")
            .unwrap()
            .progress_chars("=>-"),
    );

    let parser = Arc::new(ReceiptParser::from_config(&config.extraction));
    let source_config = Arc::new(config.source.clone());
    let permits = Arc::new(Semaphore::new(args.jobs.max(1)));

    let mut tasks = JoinSet::new();
    for (index, path) in files.into_iter().enumerate() {
        let parser = Arc::clone(&parser);
        let source_config = Arc::clone(&source_config);
        let permits = Arc::clone(&permits);

        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || {
                let outcome = parse_file(&path, &parser, &source_config);
                (path, outcome)
            })
            .await?;
            anyhow::Ok((index, result))
        });
    }

    let mut results: Vec<(usize, FileResult)> = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (index, (path, outcome)) = joined??;
        pb.inc(1);

        match outcome {
            Ok(record) => results.push((
                index,
                FileResult {
                    path,
                    record: Some(record),
                    error: None,
                },
            )),
            Err(e) => {
                let error_msg = e.to_string();
                if !args.continue_on_error {
                    pb.abandon();
                    error!("Failed to parse {}: {}", path.display(), error_msg);
                    anyhow::bail!("Parsing failed for {}: {}", path.display(), error_msg);
                }
                warn!("Failed to parse {}: {}", path.display(), error_msg);
                results.push((
                    index,
                    FileResult {
                        path,
                        record: None,
                        error: Some(error_msg),
                    },
                ));
            }
        }
    }

    pb.finish_with_message("Complete");

    results.sort_by_key(|(index, _)| *index);
    let results: Vec<FileResult> = results.into_iter().map(|(_, r)| r).collect();

    if let Some(output_dir) = &args.output_dir {
        let format = args
            .format
            .unwrap_or_else(|| config.output.default_format.into());
        write_records(output_dir, &results, format, config.output.pretty_json)?;
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

    let successful = results.iter().filter(|r| r.record.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    println!();
    println!(
        "{} Parsed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    let spend = spend_by_category(&results);
    if !spend.is_empty() {
        println!();
        println!("{}", style("Spend by category:").bold());
        for (category, amount) in &spend {
            println!("  {:<12} ₹{:>14}", category.as_str(), format_inr(*amount));
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

fn parse_file(
    path: &Path,
    parser: &ReceiptParser,
    config: &SourceConfig,
) -> billscan_core::Result<ParsedRecord> {
    let text = source::load_text(path, config)?;
    Ok(parser.parse(&text))
}

fn write_records(
    output_dir: &Path,
    results: &[FileResult],
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    for result in results {
        let Some(record) = &result.record else {
            continue;
        };

        let stem = result
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("receipt");
        let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

        let saved = SavedRecord::new(&result.path, record);
        fs::write(&output_path, format_record(&saved, format, pretty)?)?;
        debug!("Wrote output to {}", output_path.display());
    }

    Ok(())
}

/// Grand totals summed per category, over successfully parsed files.
fn spend_by_category(results: &[FileResult]) -> BTreeMap<Category, Decimal> {
    let mut spend = BTreeMap::new();
    for record in results.iter().filter_map(|r| r.record.as_ref()) {
        *spend.entry(record.category).or_insert(Decimal::ZERO) += record.totals.grand;
    }
    spend
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "file",
        "status",
        "merchant",
        "date",
        "category",
        "grand_total",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                &record.merchant,
                &record.date,
                record.category.as_str(),
                &record.totals.grand.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
