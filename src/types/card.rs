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

use crate::flip::Flip;
use crate::flip::FlipState;
use crate::types::word::Word;

/// A flashcard. The definition is not stored here: it is looked up in the
/// definition cache by word every time the card is viewed.
#[derive(Clone, Debug)]
pub struct Card {
    /// The word on the front of the card. Also the cache key.
    word: Word,
    /// Which side is showing.
    flip: FlipState,
}

impl Card {
    pub fn new(word: Word) -> Self {
        Self {
            word,
            flip: FlipState::new(),
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn is_flipped(&self) -> bool {
        self.flip.is_flipped()
    }

    pub fn has_been_revealed(&self) -> bool {
        self.flip.has_been_revealed()
    }

    pub fn flip(&mut self) -> Flip {
        self.flip.toggle()
    }
}
