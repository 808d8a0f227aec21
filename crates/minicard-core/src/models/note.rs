//! Note (topic) model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Card, CardId, NoteId};

/// A named collection of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Display label; `null` in older snapshots reads as empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub topic: String,
    #[serde(default)]
    pub cards: BTreeMap<CardId, Card>,
    pub id: NoteId,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Note {
    /// Create an empty note
    #[must_use]
    pub fn new(id: NoteId, topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            cards: BTreeMap::new(),
            id,
        }
    }

    /// Highest stacking order among the cards, never below 1
    #[must_use]
    pub fn max_z_index(&self) -> i64 {
        self.cards
            .values()
            .map(|card| card.z_index)
            .fold(1, i64::max)
    }

    /// Mint a card id from a timestamp, stepping past ids already taken
    #[must_use]
    pub fn mint_card_id(&self, timestamp_ms: i64) -> CardId {
        let mut candidate = timestamp_ms;
        while self.cards.contains_key(&CardId::new(candidate)) {
            candidate += 1;
        }
        CardId::new(candidate)
    }

    /// Card contents in enumeration order, one per line
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.cards
            .values()
            .map(|card| card.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
