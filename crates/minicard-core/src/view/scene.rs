//! Retained in-memory surface.
//!
//! Keeps the elements a host would display, in display order (the most
//! recently created element first), and lays out flow-positioned cards on a
//! grid of their footprints. Terminal front ends print it; tests inspect it.

use std::fmt::Write as _;

use super::{CardView, ElementHandle, NoteOption, Surface};
use crate::models::{NoteId, Position, StylePosition};
use crate::util::compact_text;

/// Spacing between flow-positioned cards
pub const FLOW_GAP: i32 = 8;

const PREVIEW_CHARS: usize = 48;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneElement {
    pub handle: ElementHandle,
    pub view: CardView,
}

#[derive(Debug, Clone)]
pub struct Scene {
    stage_width: i32,
    next_handle: u64,
    elements: Vec<SceneElement>,
    note_options: Vec<NoteOption>,
    selected_note: Option<NoteId>,
    secret_mode: bool,
    side_bar_width: u32,
    topic: String,
    toolbar_visible: bool,
}

impl Scene {
    #[must_use]
    pub const fn new(stage_width: i32) -> Self {
        Self {
            stage_width,
            next_handle: 0,
            elements: Vec::new(),
            note_options: Vec::new(),
            selected_note: None,
            secret_mode: false,
            side_bar_width: 0,
            topic: String::new(),
            toolbar_visible: true,
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[SceneElement] {
        &self.elements
    }

    #[must_use]
    pub fn element(&self, handle: ElementHandle) -> Option<&SceneElement> {
        self.elements.iter().find(|element| element.handle == handle)
    }

    /// Card texts in display order
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.elements
            .iter()
            .map(|element| element.view.text.clone())
            .collect()
    }

    #[must_use]
    pub fn note_options(&self) -> &[NoteOption] {
        &self.note_options
    }

    #[must_use]
    pub const fn selected_note(&self) -> Option<&NoteId> {
        self.selected_note.as_ref()
    }

    #[must_use]
    pub const fn secret_mode(&self) -> bool {
        self.secret_mode
    }

    #[must_use]
    pub const fn side_bar_width(&self) -> u32 {
        self.side_bar_width
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub const fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    /// Grid slot of the `index`-th flow-positioned element
    fn flow_offset(&self, index: usize, view: &CardView) -> Position {
        let slot_width = i32::try_from(view.size.0).unwrap_or(i32::MAX).saturating_add(FLOW_GAP);
        let slot_height = i32::try_from(view.size.1).unwrap_or(i32::MAX).saturating_add(FLOW_GAP);
        let per_row = usize::try_from((self.stage_width / slot_width.max(1)).max(1)).unwrap_or(1);
        let column = i32::try_from(index % per_row).unwrap_or(0);
        let row = i32::try_from(index / per_row).unwrap_or(0);
        Position(column * slot_width, row * slot_height)
    }

    /// Plain-text picture of the scene, one line per entry
    #[must_use]
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push("Topics:".to_string());
        for option in &self.note_options {
            let marker = if self.selected_note.as_ref() == Some(&option.id) {
                ">"
            } else {
                " "
            };
            let label = if option.label.is_empty() {
                "(untitled)"
            } else {
                option.label.as_str()
            };
            lines.push(format!("  {marker} {label} [{}]", option.id));
        }

        let mut header = format!("Topic: {}", self.topic);
        if self.secret_mode {
            header.push_str("  (secret)");
        }
        lines.push(header);

        let mut stage = String::new();
        let _ = write!(
            stage,
            "Stage: {} card(s), sidebar {}px",
            self.elements.len(),
            self.side_bar_width
        );
        lines.push(stage);

        for element in &self.elements {
            let offset = self.element_offset(element.handle).unwrap_or_default();
            let text = if self.secret_mode {
                "*".repeat(element.view.text.chars().count().min(PREVIEW_CHARS))
            } else {
                compact_text(&element.view.text, PREVIEW_CHARS)
            };
            lines.push(format!(
                "  #{} [{:>4},{:>4}] z{:<3} {:<8} {}",
                element.view.card,
                offset.x(),
                offset.y(),
                element.view.z_index,
                element.view.layout.as_str(),
                text
            ));
        }

        lines
    }
}

impl Surface for Scene {
    fn set_note_options(&mut self, options: &[NoteOption], selected: Option<&NoteId>) {
        self.note_options = options.to_vec();
        self.selected_note = selected.cloned();
    }

    fn set_secret_mode(&mut self, enabled: bool) {
        self.secret_mode = enabled;
    }

    fn clear_stage(&mut self) {
        self.elements.clear();
    }

    fn create_card_element(&mut self) -> ElementHandle {
        let handle = ElementHandle(self.next_handle);
        self.next_handle += 1;
        self.elements.insert(
            0,
            SceneElement {
                handle,
                view: CardView::default(),
            },
        );
        handle
    }

    fn update_card_element(&mut self, handle: ElementHandle, view: &CardView) {
        if let Some(element) = self
            .elements
            .iter_mut()
            .find(|element| element.handle == handle)
        {
            element.view = view.clone();
        }
    }

    fn remove_element(&mut self, handle: ElementHandle) {
        self.elements.retain(|element| element.handle != handle);
    }

    fn set_side_bar_width(&mut self, width: u32) {
        self.side_bar_width = width;
    }

    fn set_topic(&mut self, topic: &str) {
        self.topic = topic.to_string();
    }

    fn set_toolbar_visible(&mut self, visible: bool) {
        self.toolbar_visible = visible;
    }

    fn stage_width(&self) -> i32 {
        self.stage_width
    }

    fn element_offset(&self, handle: ElementHandle) -> Option<Position> {
        let mut flow_index = 0;
        for element in &self.elements {
            let is_flow = element.view.layout == StylePosition::Static;
            if element.handle == handle {
                return Some(if is_flow {
                    self.flow_offset(flow_index, &element.view)
                } else {
                    element.view.position
                });
            }
            if is_flow {
                flow_index += 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Size;

    fn flow_view(text: &str) -> CardView {
        CardView {
            text: text.to_string(),
            size: Size(60, 90),
            ..CardView::default()
        }
    }

    #[test]
    fn new_elements_are_inserted_first() {
        let mut scene = Scene::new(800);
        let first = scene.create_card_element();
        let second = scene.create_card_element();
        assert_eq!(scene.elements()[0].handle, second);
        assert_eq!(scene.elements()[1].handle, first);
    }

    #[test]
    fn flow_offsets_wrap_at_stage_width() {
        let mut scene = Scene::new(140);
        let handles = (0..3)
            .map(|_| scene.create_card_element())
            .collect::<Vec<_>>();
        for handle in &handles {
            scene.update_card_element(*handle, &flow_view("x"));
        }

        // display order is newest first: handles[2], handles[1], handles[0]
        assert_eq!(scene.element_offset(handles[2]), Some(Position(0, 0)));
        assert_eq!(scene.element_offset(handles[1]), Some(Position(68, 0)));
        assert_eq!(scene.element_offset(handles[0]), Some(Position(0, 98)));
    }

    #[test]
    fn absolute_elements_use_their_position_and_leave_the_flow() {
        let mut scene = Scene::new(800);
        let older = scene.create_card_element();
        let newer = scene.create_card_element();
        scene.update_card_element(
            newer,
            &CardView {
                layout: StylePosition::Absolute,
                position: Position(300, 40),
                ..flow_view("free")
            },
        );
        scene.update_card_element(older, &flow_view("flow"));

        assert_eq!(scene.element_offset(newer), Some(Position(300, 40)));
        assert_eq!(scene.element_offset(older), Some(Position(0, 0)));
    }

    #[test]
    fn secret_mode_masks_card_text() {
        let mut scene = Scene::new(800);
        let handle = scene.create_card_element();
        scene.update_card_element(handle, &flow_view("pin 1234"));
        scene.set_secret_mode(true);

        let lines = scene.render_lines();
        assert!(lines.iter().any(|line| line.ends_with("********")));
        assert!(!lines.iter().any(|line| line.contains("1234")));
    }
}
