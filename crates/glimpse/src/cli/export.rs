//! The `glimpse export` command, plus the CSV save path shared with `process`.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use glimpse_core::{validate_records, Config, CsvExporter, ExportError, ImageMetadata};

use super::interactive;

/// Arguments for the `export` command.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file of records, e.g. from `glimpse process --format json`
    pub input: PathBuf,

    /// CSV destination (prompted for on a terminal when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the export command.
pub fn execute(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    let records = load_records(&args.input)?;
    tracing::info!("Loaded {} record(s) from {:?}", records.len(), args.input);
    save_csv(&records, args.output, config)
}

fn load_records(path: &std::path::Path) -> anyhow::Result<Vec<ImageMetadata>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(validate_records(&value)?)
}

/// Render `records` as CSV and save them to `output`, or wherever the user
/// picks when `output` is `None`.
///
/// A declined prompt is reported and is not an error.
pub fn save_csv(
    records: &[ImageMetadata],
    output: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let exporter = CsvExporter::new(&config.export);
    let picker = interactive::destination_picker(output);

    match exporter.export(records, &*picker) {
        Ok(path) => {
            eprintln!("Saved {} record(s) to {}", records.len(), path.display());
            Ok(())
        }
        Err(ExportError::Cancelled) => {
            tracing::warn!("Export cancelled");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
