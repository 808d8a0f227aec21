//! Whole-state import, export and reset.

use tracing::info;

use super::Session;
use crate::error::{Error, Result};
use crate::export::render_json_export;
use crate::host::{Clipboard, Prompt};
use crate::models::AppState;
use crate::storage::KeyValueStore;
use crate::view::Surface;

pub const IMPORT_PROMPT: &str = "Please input your Exported Data";
/// Phrase the user must type to wipe everything
pub const RESET_CONFIRMATION: &str = "DELETE ALL";
pub const RESET_PROMPT: &str = "All data will be lost, input to make sure: DELETE ALL";

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Serialized snapshot, the same text that is persisted
    pub fn export_json(&self, pretty: bool) -> Result<String> {
        Ok(render_json_export(self.store.state(), pretty)?)
    }

    /// Copy the serialized snapshot to the clipboard
    pub fn export_all(&mut self, clipboard: &mut dyn Clipboard) -> Result<()> {
        let serialized = self.export_json(false)?;
        self.write_clipboard(clipboard, &serialized)?;
        info!(bytes = serialized.len(), "Exported state to clipboard");
        Ok(())
    }

    /// Ask for an exported snapshot and replace the state with it.
    ///
    /// Returns `false` when the answer is blank or cancelled.
    pub fn import_all(&mut self, prompt: &mut dyn Prompt) -> Result<bool> {
        let answer = prompt.ask_text(IMPORT_PROMPT, None).unwrap_or_default();
        self.import_text(&answer)
    }

    /// Replace the state with a serialized snapshot.
    ///
    /// Text that does not parse leaves the state untouched, queues a
    /// notification and returns [`Error::InvalidState`].
    pub fn import_text(&mut self, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let state = match AppState::from_json(text) {
            Ok(state) => state,
            Err(error) => {
                let error = Error::InvalidState(error.to_string());
                self.notify(format!("Import failed: {error}"));
                return Err(error);
            }
        };

        let notes = state.notes.len();
        self.store.replace(state)?;
        self.render_all();
        info!(notes, "Imported state");
        Ok(true)
    }

    /// Card texts of the topic on screen, one per line
    #[must_use]
    pub fn current_note_text(&self) -> String {
        self.store
            .state()
            .effective_note()
            .map(|note| note.plain_text())
            .unwrap_or_default()
    }

    /// Copy the card texts of the topic on screen to the clipboard
    pub fn copy_current_note_text(&mut self, clipboard: &mut dyn Clipboard) -> Result<String> {
        let text = self.current_note_text();
        self.write_clipboard(clipboard, &text)?;
        Ok(text)
    }

    /// Wipe storage and state once the user types [`RESET_CONFIRMATION`]
    pub fn reset_all(&mut self, prompt: &mut dyn Prompt) -> Result<bool> {
        let confirmed = prompt
            .ask_text(RESET_PROMPT, None)
            .is_some_and(|answer| answer == RESET_CONFIRMATION);
        if !confirmed {
            return Ok(false);
        }

        self.store.reset()?;
        self.render_all();
        Ok(true)
    }

    fn write_clipboard(&mut self, clipboard: &mut dyn Clipboard, text: &str) -> Result<()> {
        clipboard.write_text(text).inspect_err(|error| {
            self.notify(error.to_string());
        })
    }
}
