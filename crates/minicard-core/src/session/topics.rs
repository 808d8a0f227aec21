//! Topic (note) lifecycle and navigation.

use tracing::info;

use super::Session;
use crate::error::{Error, Result};
use crate::host::Prompt;
use crate::models::{Note, NoteId};
use crate::storage::KeyValueStore;
use crate::util::normalize_text_option;
use crate::view::Surface;

pub const CREATE_TOPIC_PROMPT: &str = "Please input this Topic";
pub const EDIT_TOPIC_PROMPT: &str = "Please Edit this Topic";

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Ask for a label and start a new, empty, current topic.
    ///
    /// A cancelled or blank answer creates nothing.
    pub fn create_topic(&mut self, prompt: &mut dyn Prompt) -> Result<Option<NoteId>> {
        let Some(topic) = normalize_text_option(prompt.ask_text(CREATE_TOPIC_PROMPT, None)) else {
            return Ok(None);
        };

        let now = self.clock.now_ms();
        let id = self.store.mutate(|state| {
            let id = state.mint_note_id(now);
            state
                .notes
                .insert(id.clone(), Note::new(id.clone(), topic));
            state.current_note_id = Some(id.clone());
            id
        })?;
        self.render_all();
        info!(note = %id, "Created topic");
        Ok(Some(id))
    }

    /// Delete the topic on screen.
    ///
    /// `current_note_id` is left pointing at the removed id; views fall back
    /// to the first remaining topic.
    pub fn delete_current_topic(&mut self) -> Result<Option<NoteId>> {
        let Some(id) = self.store.state().effective_note_id().cloned() else {
            return Ok(None);
        };

        self.store.mutate(|state| {
            state.notes.remove(&id);
        })?;
        self.render_all();
        info!(note = %id, "Deleted topic");
        Ok(Some(id))
    }

    /// Relabel the topic on screen with whatever the user answers.
    ///
    /// Unlike other prompts a cancelled answer is applied too, as an empty
    /// label. Returns `false` only when there is no topic to edit.
    pub fn edit_topic(&mut self, prompt: &mut dyn Prompt) -> Result<bool> {
        let Some(current) = self
            .store
            .state()
            .effective_note()
            .map(|note| note.topic.clone())
        else {
            return Ok(false);
        };

        let topic = prompt
            .ask_text(EDIT_TOPIC_PROMPT, Some(&current))
            .unwrap_or_default();
        self.store.mutate(|state| {
            if let Some(note) = state.effective_note_mut() {
                note.topic = topic;
            }
        })?;
        self.render_all();
        Ok(true)
    }

    /// Move to the following topic, wrapping after the last
    pub fn next_topic(&mut self) -> Result<Option<NoteId>> {
        self.cycle_topic(1)
    }

    /// Move to the preceding topic, wrapping before the first
    pub fn previous_topic(&mut self) -> Result<Option<NoteId>> {
        self.cycle_topic(-1)
    }

    fn cycle_topic(&mut self, step: isize) -> Result<Option<NoteId>> {
        let Some(id) = self.store.state().adjacent_note_id(step) else {
            return Ok(None);
        };
        self.store.mutate(|state| {
            state.current_note_id = Some(id.clone());
        })?;
        self.render_all();
        Ok(Some(id))
    }

    /// Jump straight to a topic picked in the selector
    pub fn switch_topic(&mut self, id: &NoteId) -> Result<()> {
        if !self.store.state().notes.contains_key(id) {
            return Err(Error::NotFound(format!("topic {id}")));
        }
        self.store.mutate(|state| {
            state.current_note_id = Some(id.clone());
        })?;
        self.render_all();
        Ok(())
    }

    /// One line per topic, the one on screen marked with `>`
    #[must_use]
    pub fn topic_lines(&self) -> Vec<String> {
        let state = self.store.state();
        let effective = state.effective_note_id();
        state
            .notes
            .iter()
            .map(|(id, note)| {
                let marker = if Some(id) == effective { "> " } else { "  " };
                format!("{marker}{}", note.topic)
            })
            .collect()
    }
}
