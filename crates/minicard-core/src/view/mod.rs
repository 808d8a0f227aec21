//! View projection of the application state.
//!
//! [`ViewRenderer`] owns the mapping from card ids to the elements a
//! [`Surface`] created for them, so state identity never has to be recovered
//! by searching the presentation.

mod scene;

pub use scene::{Scene, SceneElement, FLOW_GAP};

use std::collections::HashMap;

use tracing::debug;

use crate::models::{AppState, Card, CardId, NoteId, Position, Size, StylePosition};

/// Opaque handle to an element owned by a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(pub u64);

/// Everything a surface needs to draw one card
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CardView {
    pub card: CardId,
    pub layout: StylePosition,
    pub position: Position,
    pub size: Size,
    pub z_index: i64,
    pub text: String,
    pub background: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            card: card.id(),
            layout: card.style_position,
            position: card.position,
            size: card.size,
            z_index: card.z_index,
            text: card.content.clone(),
            background: card.bgc.clone(),
        }
    }
}

/// One entry of the note selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteOption {
    pub id: NoteId,
    pub label: String,
}

/// Drawing primitives provided by the host
pub trait Surface {
    /// Replace the note selector entries and its selection
    fn set_note_options(&mut self, options: &[NoteOption], selected: Option<&NoteId>);
    fn set_secret_mode(&mut self, enabled: bool);
    /// Remove every card element from the stage
    fn clear_stage(&mut self);
    /// Create an empty card element as the most recently added one
    fn create_card_element(&mut self) -> ElementHandle;
    fn update_card_element(&mut self, handle: ElementHandle, view: &CardView);
    fn remove_element(&mut self, handle: ElementHandle);
    fn set_side_bar_width(&mut self, width: u32);
    fn set_topic(&mut self, topic: &str);
    fn set_toolbar_visible(&mut self, visible: bool);
    /// Visible width of the stage in pixels
    fn stage_width(&self) -> i32;
    /// Where an element currently sits on the stage
    fn element_offset(&self, handle: ElementHandle) -> Option<Position>;
}

pub struct ViewRenderer<V: Surface> {
    surface: V,
    elements: HashMap<CardId, ElementHandle>,
}

impl<V: Surface> ViewRenderer<V> {
    pub fn new(surface: V) -> Self {
        Self {
            surface,
            elements: HashMap::new(),
        }
    }

    pub const fn surface(&self) -> &V {
        &self.surface
    }

    pub fn into_surface(self) -> V {
        self.surface
    }

    /// Redraw everything from the state
    pub fn render_all(&mut self, state: &AppState) {
        let options = state
            .notes
            .iter()
            .map(|(id, note)| NoteOption {
                id: id.clone(),
                label: note.topic.clone(),
            })
            .collect::<Vec<_>>();
        let effective = state.effective_note();

        self.surface
            .set_note_options(&options, effective.map(|note| &note.id));
        self.surface.set_secret_mode(state.secret_mode);

        self.surface.clear_stage();
        self.elements.clear();
        if let Some(note) = effective {
            for card in note.cards.values() {
                self.render_card(card);
            }
        }

        self.surface.set_side_bar_width(state.side_bar_width);
        self.surface
            .set_topic(effective.map_or("", |note| note.topic.as_str()));
        debug!(
            cards = self.elements.len(),
            notes = options.len(),
            "Rendered stage"
        );
    }

    /// Create or update the element of a single card
    pub fn render_card(&mut self, card: &Card) {
        let handle = match self.elements.get(&card.id()) {
            Some(handle) => *handle,
            None => {
                let handle = self.surface.create_card_element();
                self.elements.insert(card.id(), handle);
                handle
            }
        };
        self.surface
            .update_card_element(handle, &CardView::from(card));
    }

    /// Remove a card's element. Returns `false` when none was rendered.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        match self.elements.remove(&id) {
            Some(handle) => {
                self.surface.remove_element(handle);
                true
            }
            None => false,
        }
    }

    pub fn apply_secret_mode(&mut self, enabled: bool) {
        self.surface.set_secret_mode(enabled);
    }

    pub fn apply_side_bar_width(&mut self, width: u32) {
        self.surface.set_side_bar_width(width);
    }

    pub fn set_toolbar_visible(&mut self, visible: bool) {
        self.surface.set_toolbar_visible(visible);
    }

    #[must_use]
    pub fn handle_of(&self, id: CardId) -> Option<ElementHandle> {
        self.elements.get(&id).copied()
    }

    /// Current on-stage offset of a card's element
    #[must_use]
    pub fn offset_of(&self, id: CardId) -> Option<Position> {
        self.handle_of(id)
            .and_then(|handle| self.surface.element_offset(handle))
    }

    #[must_use]
    pub fn stage_width(&self) -> i32 {
        self.surface.stage_width()
    }

    #[must_use]
    pub fn rendered_cards(&self) -> usize {
        self.elements.len()
    }
}
