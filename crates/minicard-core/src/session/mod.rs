//! Interaction handlers.
//!
//! A [`Session`] owns the state store and the view renderer. Each handler
//! takes `&mut self`, changes the state through [`StateStore::mutate`] (which
//! persists before returning) and then refreshes the affected part of the
//! view. Host capabilities such as prompting or the clipboard are passed in
//! per call.

mod cards;
mod gateway;
mod gesture;
mod modes;
mod topics;


pub use gateway::RESET_CONFIRMATION;
pub use gesture::{DragSession, ListenerId, PointerEvent, PointerListeners, ResizeSession};

use tracing::warn;

use crate::config::Config;
use crate::host::{Clock, SystemClock};
use crate::models::{AppState, Note, NoteId};
use crate::storage::KeyValueStore;
use crate::store::StateStore;
use crate::view::{Surface, ViewRenderer};

pub struct Session<S: KeyValueStore, V: Surface> {
    store: StateStore<S>,
    view: ViewRenderer<V>,
    config: Config,
    clock: Box<dyn Clock>,
    listeners: PointerListeners,
    input: String,
    pure_mode: bool,
    notifications: Vec<String>,
}

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Build a session and draw the initial view
    pub fn new(store: StateStore<S>, surface: V, config: Config) -> Self {
        let mut session = Self {
            store,
            view: ViewRenderer::new(surface),
            config,
            clock: Box::new(SystemClock),
            listeners: PointerListeners::default(),
            input: String::new(),
            pure_mode: false,
            notifications: Vec::new(),
        };
        session.render_all();
        session
    }

    /// Replace the timestamp source used for new ids
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub const fn state(&self) -> &AppState {
        self.store.state()
    }

    pub const fn store(&self) -> &StateStore<S> {
        &self.store
    }

    pub const fn view(&self) -> &ViewRenderer<V> {
        &self.view
    }

    pub const fn surface(&self) -> &V {
        self.view.surface()
    }

    pub const fn listeners(&self) -> &PointerListeners {
        &self.listeners
    }

    /// Redraw the whole view from the current state
    pub fn render_all(&mut self) {
        self.view.render_all(self.store.state());
    }

    /// Messages for the user queued since the last drain
    pub fn drain_notifications(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notifications)
    }

    fn notify(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        self.notifications.push(message);
    }

    pub fn into_parts(self) -> (StateStore<S>, V) {
        (self.store, self.view.into_surface())
    }
}

/// The effective note, creating an untitled one when there are no notes.
///
/// Returns the note and whether it had to be created.
fn ensure_effective_note(state: &mut AppState, timestamp_ms: i64) -> (&mut Note, bool) {
    let (id, created) = match state.effective_note_id() {
        Some(id) => (id.clone(), false),
        None => {
            let id: NoteId = state.mint_note_id(timestamp_ms);
            state.current_note_id = Some(id.clone());
            (id, true)
        }
    };
    let note = state
        .notes
        .entry(id.clone())
        .or_insert_with(|| Note::new(id, ""));
    (note, created)
}
