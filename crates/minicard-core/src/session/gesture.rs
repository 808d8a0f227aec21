//! Pointer gestures: dragging cards and resizing the side bar.
//!
//! A gesture subscribes a move and a release listener when it starts. The
//! session value returned by `begin_*` owns those subscriptions and drops
//! them on release, or when it goes out of scope without a release, so no
//! listener outlives its gesture.

use tracing::{debug, info};

use super::Session;
use crate::config::DropBehavior;
use crate::error::Result;
use crate::models::{CardId, Point, Position, StylePosition};
use crate::storage::KeyValueStore;
use crate::view::Surface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Global pointer listeners currently installed
#[derive(Debug, Default)]
pub struct PointerListeners {
    next: u64,
    active: Vec<(ListenerId, PointerEvent)>,
}

impl PointerListeners {
    pub fn subscribe(&mut self, event: PointerEvent) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.active.push((id, event));
        id
    }

    /// Returns `false` if the listener was not installed
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.active.len();
        self.active.retain(|(active, _)| *active != id);
        self.active.len() != before
    }

    #[must_use]
    pub fn active(&self) -> usize {
        self.active.len()
    }
}

/// The move/release pair held by one gesture
#[derive(Debug)]
struct GestureSubscription {
    on_move: ListenerId,
    on_release: ListenerId,
}

impl GestureSubscription {
    fn open(listeners: &mut PointerListeners) -> Self {
        Self {
            on_move: listeners.subscribe(PointerEvent::Move),
            on_release: listeners.subscribe(PointerEvent::Release),
        }
    }

    fn close(self, listeners: &mut PointerListeners) {
        listeners.unsubscribe(self.on_move);
        listeners.unsubscribe(self.on_release);
    }
}

/// A card being dragged
pub struct DragSession<'a, S: KeyValueStore, V: Surface> {
    session: &'a mut Session<S, V>,
    card: CardId,
    origin: Point,
    offset: Position,
    subscription: Option<GestureSubscription>,
}

/// The side bar being resized
pub struct ResizeSession<'a, S: KeyValueStore, V: Surface> {
    session: &'a mut Session<S, V>,
    origin_x: i32,
    initial_width: u32,
    subscription: Option<GestureSubscription>,
}

impl<S: KeyValueStore, V: Surface> Session<S, V> {
    /// Press on a card: lift it out of the flow and above every other card.
    ///
    /// Returns `None` when the card is not in the effective note.
    pub fn begin_drag(
        &mut self,
        id: CardId,
        pointer: Point,
    ) -> Result<Option<DragSession<'_, S, V>>> {
        let Some(stored_position) = self
            .store
            .state()
            .effective_note()
            .and_then(|note| note.cards.get(&id))
            .map(|card| card.position)
        else {
            return Ok(None);
        };
        let offset = self.view.offset_of(id).unwrap_or(stored_position);

        let lifted = self.store.mutate(|state| {
            let note = state.effective_note_mut()?;
            let z_index = note.max_z_index() + 1;
            let card = note.cards.get_mut(&id)?;
            card.style_position = StylePosition::Absolute;
            card.z_index = z_index;
            Some(card.clone())
        })?;
        if let Some(card) = &lifted {
            self.view.render_card(card);
        }

        let subscription = GestureSubscription::open(&mut self.listeners);
        debug!(card = %id, x = offset.x(), y = offset.y(), "Drag started");
        Ok(Some(DragSession {
            session: self,
            card: id,
            origin: pointer,
            offset,
            subscription: Some(subscription),
        }))
    }

    /// Whether `x` lies in the grab zone along the side bar's trailing edge
    #[must_use]
    pub fn in_resize_grab_zone(&self, x: i32) -> bool {
        let width = i64::from(self.store.state().side_bar_width);
        let x = i64::from(x);
        x * 10 > width * 9 && x < width
    }

    /// Press near the side bar's edge. Returns `None` outside the grab zone.
    pub fn begin_resize(&mut self, x: i32) -> Option<ResizeSession<'_, S, V>> {
        if !self.in_resize_grab_zone(x) {
            return None;
        }
        let initial_width = self.store.state().side_bar_width;
        let subscription = GestureSubscription::open(&mut self.listeners);
        debug!(width = initial_width, "Resize started");
        Some(ResizeSession {
            session: self,
            origin_x: x,
            initial_width,
            subscription: Some(subscription),
        })
    }
}

impl<S: KeyValueStore, V: Surface> DragSession<'_, S, V> {
    #[must_use]
    pub const fn card(&self) -> CardId {
        self.card
    }

    /// Follow the pointer: the card sits at its start offset plus the delta
    pub fn move_to(&mut self, pointer: Point) -> Result<()> {
        let position = self.offset.translated(self.origin, pointer);
        let id = self.card;
        let moved = self.session.store.mutate(|state| {
            let card = state.effective_note_mut()?.cards.get_mut(&id)?;
            card.position = position;
            Some(card.clone())
        })?;
        if let Some(card) = &moved {
            self.session.view.render_card(card);
        }
        Ok(())
    }

    /// Let go of the card and apply the drop rule.
    ///
    /// The rule reads the release point, so a press and release with no
    /// move in between still snaps back when it lands inside the stage.
    ///
    /// Returns the card's layout mode after the drop, `None` if the card
    /// disappeared during the gesture.
    pub fn release(mut self, pointer: Point) -> Result<Option<StylePosition>> {
        if let Some(subscription) = self.subscription.take() {
            subscription.close(&mut self.session.listeners);
        }

        let inside_stage = pointer.x <= self.session.view.stage_width();
        let layout = match self.session.config.drop_behavior {
            DropBehavior::SnapBack if inside_stage => StylePosition::Static,
            DropBehavior::SnapBack | DropBehavior::KeepFree => StylePosition::Absolute,
        };

        let id = self.card;
        let dropped = self.session.store.mutate(|state| {
            let card = state.effective_note_mut()?.cards.get_mut(&id)?;
            card.style_position = layout;
            Some(card.clone())
        })?;
        if let Some(card) = &dropped {
            self.session.view.render_card(card);
            info!(card = %id, layout = layout.as_str(), "Card dropped");
        }
        Ok(dropped.map(|card| card.style_position))
    }
}

impl<S: KeyValueStore, V: Surface> Drop for DragSession<'_, S, V> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close(&mut self.session.listeners);
        }
    }
}

impl<S: KeyValueStore, V: Surface> ResizeSession<'_, S, V> {
    /// Follow the pointer; the width is clamped and persisted on every move
    pub fn move_to(&mut self, x: i32) -> Result<u32> {
        let requested = i64::from(self.initial_width) + i64::from(x) - i64::from(self.origin_x);
        let width = self
            .session
            .store
            .mutate(|state| state.set_side_bar_width(requested))?;
        self.session.view.apply_side_bar_width(width);
        Ok(width)
    }

    pub fn release(mut self) -> u32 {
        if let Some(subscription) = self.subscription.take() {
            subscription.close(&mut self.session.listeners);
        }
        let width = self.session.store.state().side_bar_width;
        debug!(width, "Resize finished");
        width
    }
}

impl<S: KeyValueStore, V: Surface> Drop for ResizeSession<'_, S, V> {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close(&mut self.session.listeners);
        }
    }
}
