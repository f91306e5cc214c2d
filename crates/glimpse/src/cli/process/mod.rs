//! The `glimpse process` command.

mod batch;
mod emit;
mod setup;
pub mod types;

pub use types::OutputFormat;

use clap::Args;
use glimpse_core::Config;
use std::path::PathBuf;

use super::interactive;
use batch::run_batch;
use emit::emit_records;
use setup::setup_processor;

/// Arguments for the `process` command.
#[derive(Args, Debug, Default)]
pub struct ProcessArgs {
    /// Image files or folders (prompted for on a terminal when omitted)
    pub inputs: Vec<PathBuf>,

    /// Output file (stdout for JSON/JSONL when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Maximum concurrent API calls (defaults to `processing.concurrency`)
    #[arg(short, long)]
    pub concurrency: Option<usize>,

    /// Emit placeholder records for images that failed instead of dropping them
    #[arg(long)]
    pub keep_errors: bool,

    /// Gemini API key for this run
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

/// Execute the process command.
pub async fn execute(mut args: ProcessArgs, config: Config) -> anyhow::Result<()> {
    if args.inputs.is_empty() {
        if !interactive::is_interactive() {
            anyhow::bail!("No input paths given.\n\n  Hint: glimpse process <FILE_OR_DIR>...");
        }
        match interactive::prompt_inputs()? {
            Some(inputs) => args.inputs = inputs,
            None => return Ok(()),
        }
    }

    let processor = setup_processor(&args, &config)?;

    let candidates = processor.discover(&args.inputs);
    tracing::info!("Found {} candidate file(s)", candidates.len());

    let report = run_batch(&processor, &candidates).await?;
    let (succeeded, failed) = (report.stats.succeeded, report.stats.failed);
    let records = report.into_records(args.keep_errors);

    emit_records(&records, &args, &config)?;

    if succeeded == 0 && failed > 0 {
        anyhow::bail!("All {failed} image(s) failed; see the log above for details.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_args_default_format_is_json() {
        let args = ProcessArgs::default();
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn process_args_defaults_defer_to_config() {
        let args = ProcessArgs::default();
        assert!(args.concurrency.is_none());
        assert!(args.output.is_none());
        assert!(!args.keep_errors);
        assert!(args.inputs.is_empty());
    }
}
