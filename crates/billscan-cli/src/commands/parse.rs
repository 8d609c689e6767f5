//! Parse command - extract a record from a single receipt file.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use billscan_core::{source, ReceiptParser};

use super::{format_record, load_config, OutputFormat, SavedRecord};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input file (.txt or .pdf), or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// List fields that could not be recognised
    #[arg(long)]
    review: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = if args.input.as_os_str() == "-" {
        let mut data = Vec::new();
        std::io::stdin().read_to_end(&mut data)?;
        source::read_text("txt", &data, &config.source)?
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        source::load_text(&args.input, &config.source)?
    };

    debug!("Read {} bytes of text", text.len());

    let parser = ReceiptParser::from_config(&config.extraction);
    let record = parser.parse(&text);

    let source_name = if args.input.as_os_str() == "-" {
        Path::new("stdin")
    } else {
        args.input.as_path()
    };
    let saved = SavedRecord::new(source_name, &record);

    let format = args
        .format
        .unwrap_or_else(|| config.output.default_format.into());
    let output = format_record(&saved, format, config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.review {
        let missing = record.missing_fields();
        if missing.is_empty() {
            eprintln!("{} All fields recognised", style("✓").green());
        } else {
            eprintln!("{}", style("Fields needing review:").yellow());
            for field in missing {
                eprintln!("  - {}", field);
            }
        }
    }

    info!("Parsed {} in {:?}", source_name.display(), start.elapsed());

    Ok(())
}
