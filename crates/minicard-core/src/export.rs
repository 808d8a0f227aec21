//! Shared export helpers for the clipboard gateway and file exports.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::models::AppState;

/// Export output format shared by all clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// The snapshot itself; can be imported again
    Json,
    /// Human-readable outline of every topic; export only
    Markdown,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }
}

/// Render the snapshot as JSON, compact unless `pretty`
pub fn render_json_export(state: &AppState, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(state)
    } else {
        state.to_json()
    }
}

/// Render every topic as a Markdown section with one bullet per card
#[must_use]
pub fn render_markdown_export(state: &AppState) -> String {
    let mut output = String::new();

    for (index, note) in state.notes.values().enumerate() {
        if index > 0 {
            output.push('\n');
        }

        let topic = if note.topic.trim().is_empty() {
            "(untitled)"
        } else {
            note.topic.trim()
        };
        let _ = writeln!(output, "# {topic}");
        let _ = writeln!(output);
        for card in note.cards.values() {
            let mut lines = card.content.lines();
            let first = lines.next().unwrap_or("");
            let _ = writeln!(output, "- {first}");
            for line in lines {
                let _ = writeln!(output, "  {line}");
            }
        }
    }

    output
}

/// Render the state based on selected export format.
pub fn render_state_export(
    state: &AppState,
    format: ExportFormat,
    pretty: bool,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => render_json_export(state, pretty),
        ExportFormat::Markdown => Ok(render_markdown_export(state)),
    }
}

/// Build a deterministic default file name for export flows.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, timestamp_ms: i64) -> String {
    format!("minicard-export-{timestamp_ms}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Card, CardId, Note, NoteId};

    fn sample_state() -> AppState {
        let mut state = AppState::seed();
        let note = state.effective_note_mut().unwrap();
        note.cards.insert(
            CardId::new(2),
            Card::new(CardId::new(2), "Eggs\ndozen", "bg"),
        );
        note.cards
            .insert(CardId::new(1), Card::new(CardId::new(1), "Milk", "bg"));
        let id = NoteId::from("20000000");
        state.notes.insert(id.clone(), Note::new(id, ""));
        state
    }

    #[test]
    fn render_markdown_export_lists_topics_and_cards() {
        let rendered = render_markdown_export(&sample_state());
        assert_eq!(
            rendered,
            "# Object To BUY\n\n- Milk\n- Eggs\n  dozen\n\n# (untitled)\n\n"
        );
    }

    #[test]
    fn json_export_parses_back() {
        let state = sample_state();
        let rendered = render_state_export(&state, ExportFormat::Json, true).unwrap();
        assert_eq!(AppState::from_json(&rendered).unwrap(), state);
    }

    #[test]
    fn suggested_export_file_name_uses_format_extension() {
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, 123),
            "minicard-export-123.json"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Markdown, 456),
            "minicard-export-456.md"
        );
    }
}
