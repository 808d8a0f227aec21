//! Card model

use serde::{Deserialize, Serialize};

use super::CardId;

/// Card footprint assigned at creation. Reserved; nothing resizes cards.
pub const DEFAULT_CARD_SIZE: Size = Size(60, 90);

/// Layout mode of a card on the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StylePosition {
    /// Flow-positioned in element order
    #[default]
    Static,
    /// Freely positioned at `Card::position`
    Absolute,
}

impl StylePosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Absolute => "absolute",
        }
    }
}

/// Stage offset in pixels, persisted as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position(pub i32, pub i32);

impl Position {
    #[must_use]
    pub const fn x(self) -> i32 {
        self.0
    }

    #[must_use]
    pub const fn y(self) -> i32 {
        self.1
    }

    /// Offset this position by the distance a pointer travelled
    #[must_use]
    pub const fn translated(self, from: Point, to: Point) -> Self {
        Self(
            self.0.saturating_add(to.x.saturating_sub(from.x)),
            self.1.saturating_add(to.y.saturating_sub(from.y)),
        )
    }
}

/// Card footprint in pixels, persisted as `[width, height]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size(pub u32, pub u32);

impl Default for Size {
    fn default() -> Self {
        DEFAULT_CARD_SIZE
    }
}

/// Pointer coordinates in viewport pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A single text item on the stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Text body
    #[serde(default)]
    pub content: String,
    /// Creation timestamp (Unix ms), doubles as the card id
    pub created: CardId,
    /// Offset on the stage, meaningful while `style_position` is absolute
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub size: Size,
    /// Stacking order
    #[serde(default = "default_z_index")]
    pub z_index: i64,
    #[serde(default)]
    pub style_position: StylePosition,
    /// CSS background, fixed at creation
    #[serde(default)]
    pub bgc: String,
}

const fn default_z_index() -> i64 {
    1
}

impl Card {
    /// Create a flow-positioned card at the bottom of the stack
    #[must_use]
    pub fn new(id: CardId, content: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            created: id,
            position: Position::default(),
            size: DEFAULT_CARD_SIZE,
            z_index: default_z_index(),
            style_position: StylePosition::Static,
            bgc: background.into(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> CardId {
        self.created
    }

    #[must_use]
    pub const fn is_free(&self) -> bool {
        matches!(self.style_position, StylePosition::Absolute)
    }
}
