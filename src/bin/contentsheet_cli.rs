//! CLI tool for contentsheet - turns a JSON record file into the upload XLSX
//!
//! Usage:
//!   contentsheet_cli records.json                    # writes expedia_content_upload.xlsx
//!   contentsheet_cli records.json -o out.xlsx        # explicit output path
//!   contentsheet_cli records.json --config cfg.json  # custom columns / names
//!   contentsheet_cli records.json --strict           # fail on validation warnings

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use contentsheet::{build_upload, ContentSheetError, Record, UploadConfig};

#[derive(Parser)]
#[command(name = "contentsheet_cli")]
#[command(about = "Build a content upload workbook from JSON records", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON file holding an array of record objects
    input: PathBuf,

    /// Output path (defaults to the configured file name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON configuration with columns, sheetName and fileName
    #[arg(long)]
    config: Option<PathBuf>,

    /// Exit with an error when any record produced a validation warning
    #[arg(long)]
    strict: bool,
}

fn run(cli: &Cli) -> Result<usize, ContentSheetError> {
    let config = match &cli.config {
        Some(path) => UploadConfig::from_path(path)?,
        None => UploadConfig::default(),
    };

    let text = fs::read_to_string(&cli.input)?;
    let records: Vec<Record> = serde_json::from_str(&text)?;
    info!(records = records.len(), input = %cli.input.display(), "records loaded");

    let upload = build_upload(&records, &config)?;
    for w in &upload.warnings {
        warn!("record {}: {}", w.record + 1, w.warning);
    }

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&upload.file_name));
    fs::write(&output, &upload.bytes)?;
    info!(output = %output.display(), bytes = upload.bytes.len(), "written");

    Ok(upload.warnings.len())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(warnings) if cli.strict && warnings > 0 => {
            error!(warnings, "validation warnings in strict mode");
            ExitCode::from(2)
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
