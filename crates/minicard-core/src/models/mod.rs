//! Data models for Minicard

mod app_state;
mod card;
mod ids;
mod note;

pub use app_state::{
    clamp_side_bar_width, AppState, DEFAULT_SIDE_BAR_WIDTH, MAX_SIDE_BAR_WIDTH,
    MIN_SIDE_BAR_WIDTH, SEED_NOTE_ID, SEED_TOPIC,
};
pub use card::{Card, Point, Position, Size, StylePosition, DEFAULT_CARD_SIZE};
pub use ids::{CardId, NoteId};
pub use note::Note;
