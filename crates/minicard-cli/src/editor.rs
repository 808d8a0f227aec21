//! Card text drafted in the user's editor.

use std::env;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use crate::commands::common::normalize_content;
use crate::error::CliError;

/// Checked in order; the first one set names the editor command
const EDITOR_VARS: [&str; 3] = ["MINICARD_EDITOR", "VISUAL", "EDITOR"];

pub fn editor_command() -> String {
    EDITOR_VARS
        .iter()
        .find_map(|name| env::var(name).ok().filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| fallback_editor().to_string())
}

pub const fn fallback_editor() -> &'static str {
    if cfg!(windows) {
        "notepad"
    } else {
        "vi"
    }
}

/// Open a draft holding `initial` in the configured editor.
///
/// Returns the trimmed draft, `None` when it was left blank.
pub fn draft_card_text(initial: &str) -> Result<Option<String>, CliError> {
    draft_with(&editor_command(), initial)
}

/// Like [`draft_card_text`] with an explicit editor command line such as
/// `code --wait`
pub fn draft_with(command: &str, initial: &str) -> Result<Option<String>, CliError> {
    let mut draft = tempfile::Builder::new()
        .prefix("minicard-card-")
        .suffix(".txt")
        .tempfile()?;
    draft.write_all(initial.as_bytes())?;
    draft.flush()?;

    run_editor(command, draft.path())?;
    let edited = std::fs::read_to_string(draft.path())?;
    Ok(normalize_content(&edited))
}

fn run_editor(command: &str, path: &Path) -> Result<(), CliError> {
    let mut words = command.split_whitespace();
    let Some(program) = words.next() else {
        return Err(CliError::EditorFailed("editor command is empty".into()));
    };

    let status = Command::new(program)
        .args(words)
        .arg(path)
        .status()
        .map_err(|error| CliError::EditorFailed(format!("cannot start `{program}`: {error}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::EditorFailed(format!(
            "`{command}` exited with {status}"
        )))
    }
}
