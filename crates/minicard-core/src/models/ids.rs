//! Timestamp-derived identifiers for notes and cards

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a note (topic).
///
/// Persisted as a string. Older snapshots stored the creation timestamp as a
/// bare JSON integer, so deserialization accepts both forms.
///
/// Ordering mirrors how the snapshot's object keys enumerate: canonical
/// decimal ids come first in numeric order, anything else follows
/// lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Build an id from a millisecond timestamp
    #[must_use]
    pub fn from_timestamp(timestamp_ms: i64) -> Self {
        Self(timestamp_ms.to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value when the id is a canonical decimal integer
    #[must_use]
    pub fn as_timestamp(&self) -> Option<i64> {
        if is_canonical_decimal(&self.0) {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

fn is_canonical_decimal(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|byte| byte.is_ascii_digit())
        && (value == "0" || !value.starts_with('0'))
}

impl Ord for NoteId {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = is_canonical_decimal(&self.0);
        let right = is_canonical_decimal(&other.0);
        match (left, right) {
            (true, true) => self
                .0
                .len()
                .cmp(&other.0.len())
                .then_with(|| self.0.cmp(&other.0)),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for NoteId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NoteId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<&str> for NoteId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NoteIdVisitor;

        impl Visitor<'_> for NoteIdVisitor {
            type Value = NoteId;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a note id as string or integer")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<NoteId, E> {
                Ok(NoteId(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> Result<NoteId, E> {
                Ok(NoteId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<NoteId, E> {
                Ok(NoteId(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<NoteId, E> {
                Ok(NoteId(value.to_string()))
            }
        }

        deserializer.deserialize_any(NoteIdVisitor)
    }
}

/// Identifier of a card: its creation timestamp in milliseconds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CardId(i64);

impl CardId {
    #[must_use]
    pub const fn new(timestamp_ms: i64) -> Self {
        Self(timestamp_ms)
    }

    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CardId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
