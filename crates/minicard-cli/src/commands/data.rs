use std::path::{Path, PathBuf};

use minicard_core::export::{render_state_export, suggested_export_file_name};
use minicard_core::util::unix_timestamp_ms_now;

use crate::cli::ExportFormat;
use crate::clipboard::SystemClipboard;
use crate::commands::common::{finish, CommandContext};
use crate::error::CliError;
use crate::prompt::CliPrompt;

pub fn run_export(
    format: ExportFormat,
    output_path: Option<&Path>,
    to_clipboard: bool,
    pretty: bool,
    context: &CommandContext,
) -> Result<(), CliError> {
    let mut session = context.open_session()?;

    if to_clipboard {
        let result = session.export_all(&mut SystemClipboard);
        finish(&mut session, result)?;
        eprintln!("Copied all data to the clipboard");
        return Ok(());
    }

    let rendered = render_state_export(session.state(), format.into(), pretty)?;
    if let Some(path) = output_path {
        let path = export_target(path, format);
        std::fs::write(&path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// A directory target gets a timestamped file name inside it
pub fn export_target(path: &Path, format: ExportFormat) -> PathBuf {
    if path.is_dir() {
        path.join(suggested_export_file_name(
            format.into(),
            unix_timestamp_ms_now(),
        ))
    } else {
        path.to_path_buf()
    }
}

pub fn run_import(input_path: Option<&Path>, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;

    let result = match input_path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            session.import_text(&text)
        }
        None => session.import_all(&mut CliPrompt::Terminal),
    };

    if finish(&mut session, result)? {
        println!("Imported {} topic(s)", session.state().notes.len());
    } else {
        eprintln!("Nothing to import");
    }
    Ok(())
}

pub fn run_copy(to_stdout: bool, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;

    if to_stdout {
        println!("{}", session.current_note_text());
        return Ok(());
    }

    let result = session.copy_current_note_text(&mut SystemClipboard);
    let text = finish(&mut session, result)?;
    eprintln!("Copied {} line(s) to the clipboard", text.lines().count());
    Ok(())
}

pub fn run_reset(confirmation: Option<String>, context: &CommandContext) -> Result<(), CliError> {
    let mut session = context.open_session()?;

    let mut prompt = CliPrompt::answer_or_terminal(confirmation);
    let result = session.reset_all(&mut prompt);
    if finish(&mut session, result)? {
        println!("All data deleted");
    } else {
        eprintln!("Confirmation did not match, nothing deleted");
    }
    Ok(())
}
