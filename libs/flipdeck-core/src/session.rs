//! The active study session: card sequence, position and flip state.

use crate::error::SessionError;
use crate::types::Card;
use std::fmt;

/// 1-based position of the current card, rendered as "current of total".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub current: usize,
    pub total: usize,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.current, self.total)
    }
}

/// Navigation state over a non-empty card sequence.
///
/// Navigation wraps in both directions and always lands on the front of the
/// new card.
#[derive(Debug, Clone)]
pub struct Session {
    cards: Vec<Card>,
    current_index: usize,
    is_flipped: bool,
}

impl Session {
    pub fn new(cards: Vec<Card>) -> Result<Self, SessionError> {
        if cards.is_empty() {
            return Err(SessionError::NoCards);
        }
        Ok(Self {
            cards,
            current_index: 0,
            is_flipped: false,
        })
    }

    pub fn next(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        self.current_index = (self.current_index + 1) % self.cards.len();
        self.is_flipped = false;
    }

    pub fn previous(&mut self) {
        if self.cards.is_empty() {
            return;
        }
        let len = self.cards.len();
        self.current_index = (self.current_index + len - 1) % len;
        self.is_flipped = false;
    }

    pub fn flip(&mut self) {
        self.is_flipped = !self.is_flipped;
    }

    pub fn current_card(&self) -> &Card {
        &self.cards[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a constructed session.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn position(&self) -> Position {
        Position {
            current: self.current_index + 1,
            total: self.cards.len(),
        }
    }
}
