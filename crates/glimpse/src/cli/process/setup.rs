//! Processor setup: overrides, API key resolution and client creation.

use std::sync::Arc;

use glimpse_core::{Config, GeminiClient, ImageProcessor, ProcessOptions};

use super::{OutputFormat, ProcessArgs};
use crate::cli::interactive;

/// Build the processor for a run, failing early on a missing API key.
pub fn setup_processor(args: &ProcessArgs, config: &Config) -> anyhow::Result<ImageProcessor> {
    if args.concurrency == Some(0) {
        anyhow::bail!("--concurrency must be at least 1");
    }
    // Must fail before any API call is made.
    if args.format == OutputFormat::Csv && args.output.is_none() && !interactive::is_interactive()
    {
        anyhow::bail!("--output is required for CSV output when not running on a terminal");
    }

    let key_override = args.api_key.as_deref().filter(|k| !k.is_empty());
    let client = GeminiClient::from_config(config, key_override).map_err(|e| {
        anyhow::anyhow!("{e}\n\n  Hint: pass --api-key or run `glimpse config set-key`.")
    })?;

    let options = ProcessOptions {
        concurrency: args.concurrency,
    };
    let processor = ImageProcessor::with_options(config, Arc::new(client), &options);
    tracing::debug!(
        "Using {} via {} (concurrency {})",
        config.gemini.model,
        config.gemini.endpoint,
        processor.concurrency()
    );
    Ok(processor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_concurrency() {
        let args = ProcessArgs {
            concurrency: Some(0),
            api_key: Some("k".to_string()),
            ..ProcessArgs::default()
        };
        assert!(setup_processor(&args, &Config::default()).is_err());
    }

    #[test]
    fn api_key_override_is_enough() {
        let mut config = Config::default();
        config.gemini.api_key = String::new();
        let args = ProcessArgs {
            api_key: Some("session-key".to_string()),
            concurrency: Some(5),
            ..ProcessArgs::default()
        };
        let processor = setup_processor(&args, &config).unwrap();
        assert_eq!(processor.concurrency(), 5);
    }

    #[test]
    fn missing_key_mentions_set_key() {
        let mut config = Config::default();
        config.gemini.api_key = String::new();
        let err = setup_processor(&ProcessArgs::default(), &config)
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("glimpse config set-key"));
    }
}
