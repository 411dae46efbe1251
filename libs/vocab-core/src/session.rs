//! Caller-owned study session state.
//!
//! Tracks which card of a queue is on screen and whether its answer is
//! revealed. The session knows nothing about scheduling; the caller records
//! outcomes on the scheduler and then drops the card from the session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawSession")]
pub struct StudySession {
    terms: Vec<String>,
    index: usize,
    revealed: bool,
}

/// Session as handed back by a caller; the cursor is not trusted.
#[derive(Deserialize)]
struct RawSession {
    terms: Vec<String>,
    #[serde(default)]
    index: usize,
    #[serde(default)]
    revealed: bool,
}

impl From<RawSession> for StudySession {
    fn from(raw: RawSession) -> Self {
        if raw.index < raw.terms.len() {
            Self {
                terms: raw.terms,
                index: raw.index,
                revealed: raw.revealed,
            }
        } else {
            Self::new(raw.terms)
        }
    }
}

impl StudySession {
    pub fn new(terms: Vec<String>) -> Self {
        Self {
            terms,
            index: 0,
            revealed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn current(&self) -> Option<&str> {
        self.terms.get(self.index).map(String::as_str)
    }

    /// 1-based position of the current card.
    pub fn position(&self) -> Option<usize> {
        self.current().map(|_| self.index + 1)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) {
        if !self.is_empty() {
            self.revealed = !self.revealed;
        }
    }

    /// Move forward, wrapping to the first card.
    pub fn next(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.terms.len();
        }
        self.revealed = false;
    }

    /// Move back, wrapping to the last card.
    pub fn previous(&mut self) {
        if !self.is_empty() {
            self.index = (self.index + self.terms.len() - 1) % self.terms.len();
        }
        self.revealed = false;
    }

    /// Drop the current card, e.g. once its outcome is recorded.
    pub fn remove_current(&mut self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let removed = self.terms.remove(self.index);
        if self.index >= self.terms.len() {
            self.index = 0;
        }
        self.revealed = false;
        Some(removed)
    }
}
