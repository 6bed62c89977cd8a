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

use serde::Serialize;

use crate::flip::Flip;
use crate::lookup::cache::DefinitionCache;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::sequence::CardSequence;
use crate::sequence::SequenceError;
use crate::streak::StreakTracker;
use crate::types::date::Date;
use crate::types::definition::FetchOutcome;
use crate::types::word::Word;
use crate::types::word::parse_word_list;

/// A study session: the cards, their definitions, and the streak.
///
/// Commands are synchronous. Lookups are started in the background when a
/// card comes into view and land in the cache; the view reads the cache by
/// word every time, so a lookup that finishes after the user has moved on
/// just fills in that word's entry.
pub struct SessionController<F> {
    cache: DefinitionCache<F>,
    sequence: CardSequence,
    streak: StreakTracker,
    /// Whether to also start the lookup for the next card.
    prefetch: bool,
}

/// A snapshot of the session, for display.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SessionView {
    pub streak: u32,
    /// `None` when there are no cards yet.
    pub card: Option<CardView>,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub word: Word,
    pub outcome: FetchOutcome,
    pub is_flipped: bool,
    /// Whether the back has been shown at least once this session.
    pub revealed: bool,
    /// One-based index of the card, and the number of cards.
    pub position: (usize, usize),
}

impl<F: DefinitionFetcher> SessionController<F> {
    pub fn new(cache: DefinitionCache<F>, streak: StreakTracker, prefetch: bool) -> Self {
        Self {
            cache,
            sequence: CardSequence::default(),
            streak,
            prefetch,
        }
    }

    pub fn cache(&self) -> &DefinitionCache<F> {
        &self.cache
    }

    pub fn sequence(&self) -> &CardSequence {
        &self.sequence
    }

    pub fn streak(&self) -> &StreakTracker {
        &self.streak
    }

    /// Parse a comma-separated list and add the words at the end. Blank
    /// entries are skipped. Returns the number of cards added.
    pub fn add_words(&mut self, raw: &str) -> usize {
        let words = parse_word_list(raw);
        let added = words.len();
        if added > 0 {
            log::debug!("Adding {added} cards.");
            self.sequence.append(words);
            self.request_current();
        }
        added
    }

    pub fn go_next(&mut self) -> Result<(), SequenceError> {
        self.sequence.next()?;
        self.request_current();
        Ok(())
    }

    pub fn go_previous(&mut self) -> Result<(), SequenceError> {
        self.sequence.previous()?;
        self.request_current();
        Ok(())
    }

    /// Turn the current card over. Revealing a card counts as today's review.
    pub fn flip(&mut self, today: Date) -> Result<Flip, SequenceError> {
        let flip = self.sequence.current_card_mut()?.flip();
        if flip == Flip::Revealed {
            self.streak.record_review(today);
        }
        Ok(flip)
    }

    /// Look the current word up again if its last lookup failed.
    pub fn retry_current(&mut self) -> Result<(), SequenceError> {
        let card = self.sequence.current_card()?;
        self.cache.request_retry(card.word());
        Ok(())
    }

    pub fn current_word(&self) -> Option<Word> {
        self.sequence.current_card().ok().map(|c| c.word().clone())
    }

    pub fn view(&self) -> SessionView {
        let card = self.sequence.current_card().ok().map(|card| {
            let outcome = self
                .cache
                .get(card.word())
                .unwrap_or(FetchOutcome::Pending);
            CardView {
                word: card.word().clone(),
                outcome,
                is_flipped: card.is_flipped(),
                revealed: card.has_been_revealed(),
                position: self.sequence.position().unwrap_or((0, 0)),
            }
        });
        SessionView {
            streak: self.streak.count(),
            card,
        }
    }

    /// Wait for the current card's lookup to finish.
    pub async fn settle_current(&self) -> Option<FetchOutcome> {
        let word = self.current_word()?;
        Some(self.cache.ensure(&word).await)
    }

    fn request_current(&self) {
        if let Ok(card) = self.sequence.current_card() {
            self.cache.request(card.word());
        }
        if self.prefetch {
            if let Ok(card) = self.sequence.peek_next() {
                self.cache.request(card.word());
            }
        }
    }
}
