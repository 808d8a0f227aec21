//! System clipboard through the platform's copy command.
//! - macOS: pbcopy
//! - Linux: xclip, falling back to xsel
//! - Windows: clip.exe

use std::io::Write;
use std::process::{Child, Command, Stdio};

use minicard_core::host::Clipboard;
use minicard_core::{Error, Result};

#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let child = spawn_copy_command()?;
        pipe_into(child, text)
    }
}

#[cfg(target_os = "macos")]
fn spawn_copy_command() -> Result<Child> {
    Command::new("pbcopy")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Clipboard(format!("Failed to spawn pbcopy: {e}")))
}

#[cfg(target_os = "linux")]
fn spawn_copy_command() -> Result<Child> {
    Command::new("xclip")
        .args(["-selection", "clipboard"])
        .stdin(Stdio::piped())
        .spawn()
        .or_else(|_| {
            Command::new("xsel")
                .args(["--clipboard", "--input"])
                .stdin(Stdio::piped())
                .spawn()
        })
        .map_err(|e| {
            Error::Clipboard(format!(
                "Failed to spawn xclip or xsel: {e}. Install xclip or xsel."
            ))
        })
}

#[cfg(target_os = "windows")]
fn spawn_copy_command() -> Result<Child> {
    Command::new("clip")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|e| Error::Clipboard(format!("Failed to spawn clip: {e}")))
}

#[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
fn spawn_copy_command() -> Result<Child> {
    Err(Error::Clipboard(
        "Clipboard not supported on this platform".to_string(),
    ))
}

fn pipe_into(mut child: Child, text: &str) -> Result<()> {
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|e| Error::Clipboard(format!("Failed to write to clipboard: {e}")))?;
    }

    let status = child
        .wait()
        .map_err(|e| Error::Clipboard(format!("Failed to wait for clipboard command: {e}")))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::Clipboard(
            "Clipboard command exited with error".to_string(),
        ))
    }
}
