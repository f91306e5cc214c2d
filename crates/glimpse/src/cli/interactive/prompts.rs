//! Path, save-location and API key prompts.

use std::path::PathBuf;

use console::Style;
use dialoguer::{Confirm, Input, Password};
use glimpse_core::config::expand_path;
use glimpse_core::export::{DestinationPicker, FixedDestination};

use super::handle_interrupt;
use super::theme::{glimpse_theme, print_banner};

/// Ask for an image or folder until an existing path is given.
///
/// Returns `None` if the user interrupts.
pub fn prompt_inputs() -> anyhow::Result<Option<Vec<PathBuf>>> {
    print_banner();
    let theme = glimpse_theme();

    loop {
        let Some(raw) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path to image or folder")
                .interact_text(),
        )?
        else {
            return Ok(None);
        };

        let path = expand_path(raw.trim());
        if path.exists() {
            return Ok(Some(vec![path]));
        }

        let warn = Style::new().for_stderr().yellow();
        eprintln!(
            "  {}",
            warn.apply_to(format!("Path not found: {}", path.display()))
        );
    }
}

/// Prompt for the Gemini API key without echoing it.
pub fn prompt_api_key() -> anyhow::Result<Option<String>> {
    let key = handle_interrupt(
        Password::with_theme(&glimpse_theme())
            .with_prompt("Gemini API key")
            .allow_empty_password(true)
            .interact(),
    )?;
    Ok(key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
}

/// Save location prompt: the terminal form of a save dialog.
pub struct SavePrompt;

impl SavePrompt {
    fn ask(&self, default_filename: &str) -> anyhow::Result<Option<PathBuf>> {
        let theme = glimpse_theme();
        let Some(raw) = handle_interrupt(
            Input::<String>::with_theme(&theme)
                .with_prompt("Save CSV to")
                .default(default_filename.to_string())
                .interact_text(),
        )?
        else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let path = expand_path(raw.trim());
        if path.exists() {
            let overwrite = handle_interrupt(
                Confirm::with_theme(&theme)
                    .with_prompt(format!("{} exists. Overwrite?", path.display()))
                    .default(false)
                    .interact(),
            )?;
            if overwrite != Some(true) {
                return Ok(None);
            }
        }
        Ok(Some(path))
    }
}

impl DestinationPicker for SavePrompt {
    fn pick_destination(&self, default_filename: &str) -> Option<PathBuf> {
        match self.ask(default_filename) {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Save prompt failed: {e}");
                None
            }
        }
    }
}

/// Use `output` when given, otherwise ask.
pub fn destination_picker(output: Option<PathBuf>) -> Box<dyn DestinationPicker> {
    match output {
        Some(path) => Box::new(FixedDestination(path)),
        None => Box::new(SavePrompt),
    }
}
