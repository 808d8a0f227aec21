//! Card lifecycle: create from the input buffer, delete, edit.

use tracing::{debug, info};

use super::{ensure_effective_note, Session};
use crate::error::Result;
use crate::gradient::random_gradient;
use crate::host::Prompt;
use crate::models::{Card, CardId};
use crate::storage::KeyValueStore;
use crate::util::normalize_text_option;
use crate::view::Surface;

pub const EDIT_CARD_PROMPT: &str = "Please input new value";

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Text typed but not yet submitted
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn type_input(&mut self, text: &str) {
        self.input.push_str(text);
    }

    /// Confirm key on the input area.
    ///
    /// With `shift` held a line break is added instead of submitting.
    /// Otherwise the buffer is cleared and, when it held any text, becomes a
    /// new card in the effective note.
    pub fn submit_input(&mut self, shift: bool) -> Result<Option<CardId>> {
        if shift {
            self.input.push('\n');
            return Ok(None);
        }
        let content = std::mem::take(&mut self.input);
        self.create_card(&content)
    }

    /// Add a flow-positioned card. Blank content is ignored.
    pub fn create_card(&mut self, content: &str) -> Result<Option<CardId>> {
        if content.trim().is_empty() {
            debug!("Ignoring blank card submission");
            return Ok(None);
        }

        let now = self.clock.now_ms();
        let background = random_gradient(&mut rand::thread_rng());
        let (card, created_note) = self.store.mutate(|state| {
            let (note, created_note) = ensure_effective_note(state, now);
            let id = note.mint_card_id(now);
            let card = Card::new(id, content, background);
            note.cards.insert(id, card.clone());
            (card, created_note)
        })?;

        if created_note {
            self.render_all();
        } else {
            self.view.render_card(&card);
        }
        info!(card = %card.id(), "Created card");
        Ok(Some(card.id()))
    }

    /// Remove a card from the effective note.
    ///
    /// Returns `false` without touching storage when the card is already gone.
    pub fn delete_card(&mut self, id: CardId) -> Result<bool> {
        let exists = self
            .store
            .state()
            .effective_note()
            .is_some_and(|note| note.cards.contains_key(&id));
        if !exists {
            self.view.remove_card(id);
            debug!(card = %id, "Delete ignored, card not present");
            return Ok(false);
        }

        self.store.mutate(|state| {
            if let Some(note) = state.effective_note_mut() {
                note.cards.remove(&id);
            }
        })?;
        self.view.remove_card(id);
        info!(card = %id, "Deleted card");
        Ok(true)
    }

    /// Replace a card's text with the trimmed answer of `prompt`.
    ///
    /// A blank or cancelled answer keeps the old text; the snapshot is
    /// persisted either way. Returns whether the text changed.
    pub fn edit_card(&mut self, id: CardId, prompt: &mut dyn Prompt) -> Result<bool> {
        let Some(current) = self
            .store
            .state()
            .effective_note()
            .and_then(|note| note.cards.get(&id))
            .map(|card| card.content.clone())
        else {
            debug!(card = %id, "Edit ignored, card not present");
            return Ok(false);
        };

        let replacement = normalize_text_option(prompt.ask_text(EDIT_CARD_PROMPT, Some(&current)));
        let updated = self.store.mutate(|state| {
            let card = state.effective_note_mut()?.cards.get_mut(&id)?;
            card.content = replacement?;
            Some(card.clone())
        })?;

        match updated {
            Some(card) => {
                self.view.render_card(&card);
                info!(card = %id, "Edited card");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
