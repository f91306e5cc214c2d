//! Dialoguer theme and banner for Glimpse prompts.

use console::{style, Style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` in Glimpse colours: magenta prompts, green confirmations.
pub fn glimpse_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("?".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

/// One-line banner on stderr.
pub fn print_banner() {
    let magenta = Style::new().for_stderr().magenta().bold();
    let dim = Style::new().for_stderr().dim();
    eprintln!();
    eprintln!(
        "  {} {}",
        magenta.apply_to(format!("Glimpse v{}", glimpse_core::VERSION)),
        dim.apply_to("titles, descriptions and tags for your images")
    );
    eprintln!();
}
