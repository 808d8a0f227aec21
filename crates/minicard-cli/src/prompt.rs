//! Answers to core prompts from flags, the terminal or an editor.

use std::io::{self, BufRead, IsTerminal, Write};

use minicard_core::host::Prompt;
use tracing::warn;

use crate::commands::common::read_piped_stdin;
use crate::editor::draft_card_text;

pub enum CliPrompt {
    /// A value given up front on the command line, handed out once
    Answer(Option<String>),
    /// Ask on stderr and read one line, or take all of piped stdin
    Terminal,
    /// Open the user's editor on the default text
    Editor,
}

impl CliPrompt {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer(Some(text.into()))
    }

    /// Use `answer` when present, otherwise ask on the terminal
    pub fn answer_or_terminal(answer: Option<String>) -> Self {
        answer.map_or(Self::Terminal, Self::answer)
    }
}

impl Prompt for CliPrompt {
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        let answer = match self {
            Self::Answer(answer) => return answer.take(),
            Self::Terminal => read_terminal_answer(message, default),
            Self::Editor => draft_card_text(default.unwrap_or_default())
                .map_err(|error| io::Error::other(error.to_string())),
        };
        answer.unwrap_or_else(|error| {
            warn!("Prompt failed: {error}");
            None
        })
    }
}

fn read_terminal_answer(message: &str, default: Option<&str>) -> io::Result<Option<String>> {
    if !io::stdin().is_terminal() {
        return read_piped_stdin().map_err(|error| io::Error::other(error.to_string()));
    }

    let mut stderr = io::stderr();
    match default {
        Some(default) if !default.is_empty() => write!(stderr, "{message} [{default}]: ")?,
        _ => write!(stderr, "{message}: ")?,
    }
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
