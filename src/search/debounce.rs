//! Debounced free-text commit
//!
//! Keystrokes restart a quiet window; the text is committed to the filter
//! state only once the window elapses without another keystroke. Time is
//! passed in by the caller, so the machine never sleeps or spawns.

use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Identifies one debounce window; a newer keystroke gets a newer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DebounceToken(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    Debouncing {
        token: DebounceToken,
        text: String,
        deadline: Instant,
    },
    Committed {
        token: DebounceToken,
        text: String,
    },
}

#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    quiet: Duration,
    committed: String,
    next_token: u64,
    state: DebounceState,
}

impl SearchDebouncer {
    /// `committed` is the query already in the filter state
    #[must_use]
    pub fn new(quiet: Duration, committed: impl Into<String>) -> Self {
        Self {
            quiet,
            committed: committed.into(),
            next_token: 0,
            state: DebounceState::Idle,
        }
    }

    /// Record a keystroke; restarts the quiet window
    pub fn keystroke(&mut self, text: impl Into<String>, now: Instant) -> DebounceToken {
        self.next_token += 1;
        let token = DebounceToken(self.next_token);
        self.state = DebounceState::Debouncing {
            token,
            text: text.into(),
            deadline: now + self.quiet,
        };
        token
    }

    /// Text to commit, if the window has elapsed
    ///
    /// Returns `None` while still debouncing, and also when the settled text
    /// equals what is already committed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let DebounceState::Debouncing {
            token,
            text,
            deadline,
        } = &self.state
        else {
            return None;
        };
        if now < *deadline {
            return None;
        }

        let token = *token;
        let text = text.clone();
        self.state = DebounceState::Committed {
            token,
            text: text.clone(),
        };
        if text == self.committed {
            return None;
        }

        debug!(token = token.0, query = %text, "search text committed");
        self.committed.clone_from(&text);
        Some(text)
    }

    /// Adopt a query that changed elsewhere (back navigation, clear all)
    ///
    /// Any pending window is dropped.
    pub fn sync(&mut self, committed: impl Into<String>) {
        self.committed = committed.into();
        self.state = DebounceState::Idle;
    }

    /// True only while a keystroke is waiting out its window
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Debouncing { .. })
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Debouncing { deadline, .. } => Some(*deadline),
            _ => None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &DebounceState {
        &self.state
    }

    /// Text currently in the input box
    #[must_use]
    pub fn input(&self) -> &str {
        match &self.state {
            DebounceState::Debouncing { text, .. } | DebounceState::Committed { text, .. } => text,
            DebounceState::Idle => &self.committed,
        }
    }

    #[must_use]
    pub fn committed(&self) -> &str {
        &self.committed
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD, String::new())
    }
}
