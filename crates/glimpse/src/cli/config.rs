//! The `glimpse config` command for configuration management.

use std::path::Path;

use clap::{Args, Subcommand};
use glimpse_core::Config;

use super::interactive;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display current configuration (API key masked)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Store the Gemini API key in the config file
    SetKey {
        /// The key (prompted for when omitted)
        key: Option<String>,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let mut config = Config::load()?;
            config.gemini.api_key = masked_key(&config.gemini.api_key);
            println!("{}", config.to_toml()?);
        }

        ConfigCommand::Path => {
            println!("{}", Config::default_path().display());
        }

        ConfigCommand::Init { force } => {
            let path = Config::default_path();

            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, Config::default().to_toml()?)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None if interactive::is_interactive() => match interactive::prompt_api_key()? {
                    Some(key) => key,
                    None => {
                        eprintln!("No key entered; config unchanged.");
                        return Ok(());
                    }
                },
                None => anyhow::bail!("No key given.\n\n  Hint: glimpse config set-key <KEY>"),
            };

            let path = Config::default_path();
            save_key_to_config(&path, &key)?;
            println!("Gemini API key saved to {}", path.display());
        }
    }

    Ok(())
}

/// Write `gemini.api_key` into the TOML file at `path`, keeping everything
/// else (including comments) as is.
fn save_key_to_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc: toml_edit::DocumentMut = content
        .parse()
        .map_err(|e| anyhow::anyhow!("Cannot update {}: {e}", path.display()))?;

    if !doc.contains_key("gemini") {
        doc["gemini"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["gemini"]["api_key"] = toml_edit::value(key);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())?;
    Ok(())
}

/// Hide literal keys; `${VAR}` references are shown as written.
fn masked_key(raw: &str) -> String {
    if raw.is_empty() || (raw.starts_with("${") && raw.ends_with('}')) {
        raw.to_string()
    } else {
        "********".to_string()
    }
}
