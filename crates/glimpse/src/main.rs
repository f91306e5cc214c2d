//! Glimpse CLI - titles, descriptions and tags for images, exported to CSV.
//!
//! Glimpse sends each image to a vision model, collects the generated
//! metadata and writes it out as JSON, JSON Lines or spreadsheet-safe CSV.
//!
//! # Usage
//!
//! ```bash
//! # Caption a folder and save a CSV
//! glimpse process ./photos --format csv --output photos.csv
//!
//! # Keep failed images as placeholder rows
//! glimpse process a.jpg b.png --keep-errors > records.json
//!
//! # Re-export earlier JSON output as CSV
//! glimpse export records.json --output records.csv
//!
//! # Store the Gemini API key in the config file
//! glimpse config set-key
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Glimpse - AI-generated titles, descriptions and tags for images.
#[derive(Parser, Debug)]
#[command(name = "glimpse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate metadata for images and write JSON, JSONL or CSV
    Process(cli::process::ProcessArgs),

    /// Convert a JSON record file into CSV
    Export(cli::export::ExportArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging is not up yet, so config problems go straight to stderr.
    let config = match glimpse_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `glimpse config path`."
            );
            glimpse_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Glimpse v{}", glimpse_core::VERSION);

    let result = match cli.command {
        Commands::Process(args) => cli::process::execute(args, config).await,
        Commands::Export(args) => cli::export::execute(args, &config),
        Commands::Config(args) => cli::config::execute(args),
    };

    if let Err(e) = result {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
    Ok(())
}
