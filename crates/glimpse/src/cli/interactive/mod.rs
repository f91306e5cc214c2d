//! Terminal prompts standing in for file pickers and save dialogs.
//!
//! Everything here writes to stderr so stdout stays clean for records.

pub mod prompts;
pub mod theme;

pub use prompts::{destination_picker, prompt_api_key, prompt_inputs};

/// Whether prompts can be shown (stderr is a terminal).
pub fn is_interactive() -> bool {
    console::Term::stderr().is_term()
}

/// Convert a dialoguer result into `Ok(Some(value))` on success, `Ok(None)` on
/// interrupt (Ctrl+C / terminal disconnect), and `Err` for other I/O failures.
fn handle_interrupt<T>(result: dialoguer::Result<T>) -> anyhow::Result<Option<T>> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(dialoguer::Error::IO(e)) if e.kind() == std::io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}
