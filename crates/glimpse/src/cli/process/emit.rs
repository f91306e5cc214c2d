//! Writing processed records in the requested format.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::Context;
use glimpse_core::{Config, ImageMetadata, JsonFormat, RecordWriter};

use super::ProcessArgs;
use crate::cli::export::save_csv;

pub fn emit_records(
    records: &[ImageMetadata],
    args: &ProcessArgs,
    config: &Config,
) -> anyhow::Result<()> {
    match args.format.json_format() {
        Some(format) => write_json(records, format, args.output.as_deref()),
        None => save_csv(records, args.output.clone(), config),
    }
}

fn write_json(
    records: &[ImageMetadata],
    format: JsonFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create output file {}", path.display()))?;
            RecordWriter::new(BufWriter::new(file), format, true).write_records(records)?;
            tracing::info!("Output written to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            RecordWriter::new(stdout.lock(), format, true).write_records(records)?;
        }
    }
    Ok(())
}
