// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::card::Card;
use crate::types::word::Word;

/// Errors from navigating a [`CardSequence`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SequenceError {
    /// There are no cards.
    EmptySequence,
}

impl Display for SequenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceError::EmptySequence => write!(f, "there are no cards to study"),
        }
    }
}

/// An ordered ring of cards. Moving past either end wraps around.
///
/// Words are not deduplicated: a word that appears twice yields two cards,
/// each with its own flip state, sharing one cache entry.
#[derive(Default)]
pub struct CardSequence {
    cards: Vec<Card>,
    /// Index of the card in view. Only meaningful when `cards` is non-empty.
    current: usize,
}

impl CardSequence {
    #[cfg(test)]
    pub fn build(words: impl IntoIterator<Item = Word>) -> Self {
        let cards = words.into_iter().map(Card::new).collect();
        Self { cards, current: 0 }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn index(&self) -> Result<usize, SequenceError> {
        if self.is_empty() {
            Err(SequenceError::EmptySequence)
        } else {
            Ok(self.current)
        }
    }

    /// One-based position and total, e.g. `(1, 2)` for "1 of 2".
    pub fn position(&self) -> Result<(usize, usize), SequenceError> {
        let index = self.index()?;
        Ok((index + 1, self.len()))
    }

    pub fn next(&mut self) -> Result<&Card, SequenceError> {
        let index = self.index()?;
        self.current = (index + 1) % self.len();
        Ok(&self.cards[self.current])
    }

    pub fn previous(&mut self) -> Result<&Card, SequenceError> {
        let index = self.index()?;
        self.current = (index + self.len() - 1) % self.len();
        Ok(&self.cards[self.current])
    }

    /// Adds cards at the end. The card in view stays the same.
    pub fn append(&mut self, words: impl IntoIterator<Item = Word>) {
        self.cards.extend(words.into_iter().map(Card::new));
    }

    pub fn current_card(&self) -> Result<&Card, SequenceError> {
        let index = self.index()?;
        Ok(&self.cards[index])
    }

    pub fn current_card_mut(&mut self) -> Result<&mut Card, SequenceError> {
        let index = self.index()?;
        Ok(&mut self.cards[index])
    }

    /// The card `next()` would move to, without moving.
    pub fn peek_next(&self) -> Result<&Card, SequenceError> {
        let index = self.index()?;
        Ok(&self.cards[(index + 1) % self.len()])
    }
}
