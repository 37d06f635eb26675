//! Client-side progress through one study session's review queue.
//!
//! The server decides what is due and when it comes back; this only walks
//! the queue it returned, one card at a time.

#[cfg(test)]
#[path = "study_test.rs"]
mod study_test;

use crate::net::types::{QueueItem, Rating};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewDeck {
    items: Vec<QueueItem>,
    position: usize,
    revealed: bool,
    reviewed: usize,
    known: usize,
}

impl ReviewDeck {
    pub fn new(items: Vec<QueueItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn current(&self) -> Option<&QueueItem> {
        self.items.get(self.position)
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Show the answer side of the current card.
    pub fn reveal(&mut self) {
        if self.current().is_some() {
            self.revealed = true;
        }
    }

    /// Count `rating` against the current card and move to the next one.
    /// Returns the card that was rated.
    pub fn record(&mut self, rating: Rating) -> Option<QueueItem> {
        let item = self.current()?.clone();
        self.reviewed += 1;
        if rating.is_known() {
            self.known += 1;
        }
        self.position += 1;
        self.revealed = false;
        Some(item)
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn reviewed(&self) -> usize {
        self.reviewed
    }

    pub fn known(&self) -> usize {
        self.known
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.position)
    }

    pub fn is_finished(&self) -> bool {
        self.current().is_none()
    }
}
