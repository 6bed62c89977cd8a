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

use serde::Serialize;

/// What the dictionary told us about a word.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionRecord {
    /// The headword as returned by the dictionary.
    pub word: String,
    /// Pronunciation, e.g. `/kæt/`.
    pub phonetic: Option<String>,
    /// URL of a pronunciation recording.
    pub audio_url: Option<String>,
    pub part_of_speech: Option<String>,
    pub definition: String,
}

/// Errors that can occur when looking up a word.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FetchError {
    /// The dictionary has no entry for the word.
    NotFound,
    /// The response did not have the expected shape.
    Malformed(String),
    /// Transport failure or an unexpected HTTP status.
    Network(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "NotFound"),
            FetchError::Malformed(detail) => write!(f, "Malformed: {detail}"),
            FetchError::Network(detail) => write!(f, "NetworkError: {detail}"),
        }
    }
}

/// The state of a word's cache entry.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FetchOutcome {
    Pending,
    Resolved(DefinitionRecord),
    Failed(FetchError),
}

impl FetchOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, FetchOutcome::Pending)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn record(&self) -> Option<&DefinitionRecord> {
        match self {
            FetchOutcome::Resolved(record) => Some(record),
            _ => None,
        }
    }
}

impl From<Result<DefinitionRecord, FetchError>> for FetchOutcome {
    fn from(value: Result<DefinitionRecord, FetchError>) -> Self {
        match value {
            Ok(record) => FetchOutcome::Resolved(record),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

impl Serialize for FetchOutcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            FetchOutcome::Pending => {
                map.serialize_entry("status", "pending")?;
            }
            FetchOutcome::Resolved(record) => {
                map.serialize_entry("status", "resolved")?;
                map.serialize_entry("record", record)?;
            }
            FetchOutcome::Failed(e) => {
                map.serialize_entry("status", "failed")?;
                map.serialize_entry("reason", &e.to_string())?;
            }
        }
        map.end()
    }
}
