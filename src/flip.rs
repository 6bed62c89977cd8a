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

/// Which side of a card is showing.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Face {
    /// The word.
    #[default]
    Front,
    /// The definition.
    Back,
}

/// What a call to [`FlipState::toggle`] did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flip {
    /// `Front -> Back`. This is the transition that counts as a review.
    Revealed,
    /// `Back -> Front`.
    Hidden,
}

/// The flip state of a single card. Navigation does not reset it.
#[derive(Clone, Debug, Default)]
pub struct FlipState {
    face: Face,
    reveals: usize,
}

impl FlipState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self) -> Face {
        self.face
    }

    pub fn is_flipped(&self) -> bool {
        self.face() == Face::Back
    }

    /// Whether this card has ever shown its back.
    pub fn has_been_revealed(&self) -> bool {
        self.reveals > 0
    }

    pub fn toggle(&mut self) -> Flip {
        match self.face {
            Face::Front => {
                self.face = Face::Back;
                self.reveals += 1;
                Flip::Revealed
            }
            Face::Back => {
                self.face = Face::Front;
                Flip::Hidden
            }
        }
    }
}
