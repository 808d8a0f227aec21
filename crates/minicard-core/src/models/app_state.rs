//! Root application state, persisted as a single snapshot

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Note, NoteId};

/// Id of the note present in a fresh installation
pub const SEED_NOTE_ID: &str = "10000000";
/// Label of the note present in a fresh installation
pub const SEED_TOPIC: &str = "Object To BUY";

pub const MIN_SIDE_BAR_WIDTH: u32 = 200;
pub const MAX_SIDE_BAR_WIDTH: u32 = 1880;
pub const DEFAULT_SIDE_BAR_WIDTH: u32 = MIN_SIDE_BAR_WIDTH;

/// Clamp a requested side-bar width into the allowed range
#[must_use]
pub fn clamp_side_bar_width(width: i64) -> u32 {
    let clamped = width.clamp(i64::from(MIN_SIDE_BAR_WIDTH), i64::from(MAX_SIDE_BAR_WIDTH));
    u32::try_from(clamped).unwrap_or(MIN_SIDE_BAR_WIDTH)
}

const fn default_side_bar_width() -> u32 {
    DEFAULT_SIDE_BAR_WIDTH
}

/// Accepts any JSON number and clamps it into the allowed range
fn deserialize_side_bar_width<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let number = serde_json::Number::deserialize(deserializer)?;
    #[allow(clippy::cast_possible_truncation)]
    let width = number
        .as_i64()
        .or_else(|| number.as_u64().map(|_| i64::MAX))
        .or_else(|| number.as_f64().map(|value| value as i64))
        .unwrap_or(i64::from(DEFAULT_SIDE_BAR_WIDTH));
    Ok(clamp_side_bar_width(width))
}

/// The whole application state.
///
/// Every field tolerates absence so that the empty object left behind by a
/// reset, or a partial snapshot, still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub notes: BTreeMap<NoteId, Note>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_note_id: Option<NoteId>,
    #[serde(
        default = "default_side_bar_width",
        deserialize_with = "deserialize_side_bar_width"
    )]
    pub side_bar_width: u32,
    #[serde(default)]
    pub secret_mode: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::empty()
    }
}

impl AppState {
    /// State after a reset: no notes and no current note
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            notes: BTreeMap::new(),
            current_note_id: None,
            side_bar_width: DEFAULT_SIDE_BAR_WIDTH,
            secret_mode: false,
        }
    }

    /// State of a fresh installation
    #[must_use]
    pub fn seed() -> Self {
        let id = NoteId::from(SEED_NOTE_ID);
        let mut notes = BTreeMap::new();
        notes.insert(id.clone(), Note::new(id.clone(), SEED_TOPIC));
        Self {
            notes,
            current_note_id: Some(id),
            side_bar_width: DEFAULT_SIDE_BAR_WIDTH,
            secret_mode: false,
        }
    }

    /// Parse a serialized snapshot, clamping out-of-range values
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Compact JSON, the format written to storage and the clipboard
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// The note views should show.
    ///
    /// `current_note_id` when it resolves, otherwise the first note in
    /// enumeration order. `None` only when there are no notes at all.
    #[must_use]
    pub fn effective_note_id(&self) -> Option<&NoteId> {
        self.current_note_id
            .as_ref()
            .and_then(|id| self.notes.get_key_value(id).map(|(key, _)| key))
            .or_else(|| self.notes.keys().next())
    }

    #[must_use]
    pub fn effective_note(&self) -> Option<&Note> {
        self.effective_note_id().and_then(|id| self.notes.get(id))
    }

    pub fn effective_note_mut(&mut self) -> Option<&mut Note> {
        let id = self.effective_note_id()?.clone();
        self.notes.get_mut(&id)
    }

    /// Whether `current_note_id` points at a note that exists
    #[must_use]
    pub fn current_resolves(&self) -> bool {
        self.current_note_id
            .as_ref()
            .is_some_and(|id| self.notes.contains_key(id))
    }

    /// Mint a note id from a timestamp, stepping past ids already taken
    #[must_use]
    pub fn mint_note_id(&self, timestamp_ms: i64) -> NoteId {
        let mut candidate = timestamp_ms;
        while self.notes.contains_key(&NoteId::from_timestamp(candidate)) {
            candidate += 1;
        }
        NoteId::from_timestamp(candidate)
    }

    /// Id `step` positions away from the effective note, wrapping around
    #[must_use]
    pub fn adjacent_note_id(&self, step: isize) -> Option<NoteId> {
        let keys = self.notes.keys().collect::<Vec<_>>();
        let current = self.effective_note_id()?;
        let index = keys.iter().position(|key| *key == current)?;
        let len = isize::try_from(keys.len()).ok()?;
        let index = isize::try_from(index).ok()?;
        let next = usize::try_from((index + step).rem_euclid(len)).ok()?;
        keys.get(next).map(|key| (*key).clone())
    }

    /// Apply a clamped side-bar width
    pub fn set_side_bar_width(&mut self, width: i64) -> u32 {
        self.side_bar_width = clamp_side_bar_width(width);
        self.side_bar_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn state_with_notes(ids: &[&str]) -> AppState {
        let mut state = AppState::empty();
        for id in ids {
            let id = NoteId::from(*id);
            state.notes.insert(id.clone(), Note::new(id, "topic"));
        }
        state.current_note_id = ids.first().map(|id| NoteId::from(*id));
        state
    }

    #[test]
    fn test_seed_state_shape() {
        let state = AppState::seed();
        assert_eq!(state.notes.len(), 1);
        let note = state.effective_note().unwrap();
        assert_eq!(note.id.as_str(), SEED_NOTE_ID);
        assert_eq!(note.topic, SEED_TOPIC);
        assert!(note.cards.is_empty());
        assert!(state.current_resolves());
    }

    #[test]
    fn test_empty_object_parses_as_empty_state() {
        let state = AppState::from_json("{}").unwrap();
        assert_eq!(state, AppState::empty());
        assert!(state.effective_note().is_none());
    }

    #[test]
    fn test_from_json_clamps_width() {
        let state = AppState::from_json(r#"{"sideBarWidth":5000}"#).unwrap();
        assert_eq!(state.side_bar_width, MAX_SIDE_BAR_WIDTH);
        let state = AppState::from_json(r#"{"sideBarWidth":3}"#).unwrap();
        assert_eq!(state.side_bar_width, MIN_SIDE_BAR_WIDTH);
    }

    #[test]
    fn test_from_json_clamps_width_outside_u32_range() {
        let raw = r#"{"notes":{"1":{"topic":"kept","cards":{},"id":"1"}},"sideBarWidth":-50}"#;
        let state = AppState::from_json(raw).unwrap();
        assert_eq!(state.side_bar_width, MIN_SIDE_BAR_WIDTH);
        assert_eq!(state.notes.len(), 1);

        let state = AppState::from_json(r#"{"sideBarWidth":5000000000}"#).unwrap();
        assert_eq!(state.side_bar_width, MAX_SIDE_BAR_WIDTH);
        let state = AppState::from_json(r#"{"sideBarWidth":18446744073709551615}"#).unwrap();
        assert_eq!(state.side_bar_width, MAX_SIDE_BAR_WIDTH);
        let state = AppState::from_json(r#"{"sideBarWidth":312.5}"#).unwrap();
        assert_eq!(state.side_bar_width, 312);
    }

    #[test]
    fn test_legacy_snapshot_with_numeric_ids_loads() {
        let raw = r#"{"notes":{"10000000":{"topic":"Object To BUY","cards":{"1700000000000":{"content":"Buy milk","created":1700000000000,"position":[12,34],"size":[60,90],"zIndex":3,"stylePosition":"absolute","bgc":"linear-gradient(1deg,red,red,red)"}},"id":"10000000"},"1700000000500":{"topic":"Work","cards":{},"id":1700000000500}},"currentNoteId":1700000000500,"sideBarWidth":320,"secretMode":true}"#;
        let state = AppState::from_json(raw).unwrap();
        assert_eq!(state.notes.len(), 2);
        assert_eq!(
            state.current_note_id.as_ref().map(NoteId::as_str),
            Some("1700000000500")
        );
        assert_eq!(state.side_bar_width, 320);
        assert!(state.secret_mode);
        let seed = &state.notes[&NoteId::from("10000000")];
        assert_eq!(seed.cards.values().next().unwrap().content, "Buy milk");
    }

    #[test]
    fn test_effective_note_falls_back_when_dangling() {
        let mut state = state_with_notes(&["1", "2"]);
        state.current_note_id = Some(NoteId::from("9"));
        assert!(!state.current_resolves());
        assert_eq!(state.effective_note_id().map(NoteId::as_str), Some("1"));
    }

    #[test]
    fn test_adjacent_note_wraps_both_ways() {
        let state = state_with_notes(&["1", "2", "3"]);
        assert_eq!(state.adjacent_note_id(1).unwrap().as_str(), "2");
        assert_eq!(state.adjacent_note_id(-1).unwrap().as_str(), "3");
        assert_eq!(state.adjacent_note_id(3).unwrap().as_str(), "1");
        assert!(AppState::empty().adjacent_note_id(1).is_none());
    }

    #[test]
    fn test_set_side_bar_width_clamps() {
        let mut state = AppState::seed();
        assert_eq!(state.set_side_bar_width(-50), MIN_SIDE_BAR_WIDTH);
        assert_eq!(state.set_side_bar_width(10_000), MAX_SIDE_BAR_WIDTH);
        assert_eq!(state.set_side_bar_width(640), 640);
    }

    #[test]
    fn test_mint_note_id_skips_existing() {
        let state = state_with_notes(&["100", "101"]);
        assert_eq!(state.mint_note_id(100).as_str(), "102");
    }
}
