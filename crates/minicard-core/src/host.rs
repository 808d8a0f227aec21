//! Host capabilities the handlers depend on.
//!
//! Handlers never talk to a terminal, window or OS service directly; they go
//! through these traits. Front ends provide real implementations, tests use
//! the scripted ones defined here.

use std::cell::Cell;
use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::util::unix_timestamp_ms_now;

/// Ask the user for a line of text
pub trait Prompt {
    /// Returns `None` when the user cancels.
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Option<String>;
}

/// System clipboard
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Fullscreen presentation of the window
pub trait Presentation {
    fn request_fullscreen(&mut self) -> Result<()>;
    fn exit_fullscreen(&mut self) -> Result<()>;
}

/// Source of creation timestamps
pub trait Clock {
    /// Current time in Unix milliseconds
    fn now_ms(&self) -> i64;
}

/// Wall clock backed by `chrono`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        unix_timestamp_ms_now()
    }
}

/// Deterministic clock advancing by a fixed step on every read
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<i64>,
    step: i64,
}

impl SteppingClock {
    #[must_use]
    pub const fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            next: Cell::new(start_ms),
            step: step_ms,
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

/// Prompt answering from a fixed script, recording every question asked
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Option<String>>,
    asked: Vec<(String, Option<String>)>,
}

impl ScriptedPrompt {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer
    #[must_use]
    pub fn answer(mut self, text: impl Into<String>) -> Self {
        self.answers.push_back(Some(text.into()));
        self
    }

    /// Queue a cancellation
    #[must_use]
    pub fn cancel(mut self) -> Self {
        self.answers.push_back(None);
        self
    }

    /// Questions asked so far with their default values
    #[must_use]
    pub fn asked(&self) -> &[(String, Option<String>)] {
        &self.asked
    }
}

impl Prompt for ScriptedPrompt {
    fn ask_text(&mut self, message: &str, default: Option<&str>) -> Option<String> {
        self.asked
            .push((message.to_string(), default.map(str::to_string)));
        self.answers.pop_front().flatten()
    }
}

/// Clipboard kept in memory; can be told to refuse writes
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    refuse: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write, like a denied permission
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            contents: None,
            refuse: true,
        }
    }

    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.refuse {
            return Err(Error::Clipboard("clipboard write was denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Presentation that records fullscreen state; can be told to refuse
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    fullscreen: bool,
    refuse: bool,
}

impl RecordingPresentation {
    #[must_use]
    pub fn refusing() -> Self {
        Self {
            fullscreen: false,
            refuse: true,
        }
    }

    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}

impl Presentation for RecordingPresentation {
    fn request_fullscreen(&mut self) -> Result<()> {
        if self.refuse {
            return Err(Error::Presentation(
                "fullscreen request was denied".to_string(),
            ));
        }
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.fullscreen = false;
        Ok(())
    }
}
