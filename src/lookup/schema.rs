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

//! The JSON shape returned by the dictionary endpoint. Every field is
//! optional here; what is actually required is checked in [`parse_entries`].

use serde::Deserialize;

use crate::types::definition::DefinitionRecord;
use crate::types::definition::FetchError;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub word: Option<String>,
    pub phonetic: Option<String>,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Deserialize, Debug)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Meaning {
    pub part_of_speech: Option<String>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Deserialize, Debug)]
pub struct Definition {
    pub definition: Option<String>,
}

/// Parse a response body into a record for `word`.
///
/// An empty array means the dictionary has no entry. Anything that is not an
/// array of entries, or whose first entry lacks a first meaning with a first
/// definition, is malformed.
pub fn parse_entries(word: &str, body: &str) -> Result<DefinitionRecord, FetchError> {
    let entries: Vec<Entry> =
        serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    let entry = match entries.into_iter().next() {
        Some(entry) => entry,
        None => return Err(FetchError::NotFound),
    };
    let meaning = entry
        .meanings
        .first()
        .ok_or_else(|| FetchError::Malformed("entry has no meanings".to_string()))?;
    let definition = meaning
        .definitions
        .first()
        .and_then(|d| non_empty(d.definition.as_deref()))
        .ok_or_else(|| FetchError::Malformed("meaning has no definition".to_string()))?;
    let phonetic = entry
        .phonetics
        .iter()
        .find_map(|p| non_empty(p.text.as_deref()))
        .or_else(|| non_empty(entry.phonetic.as_deref()));
    let audio_url = entry
        .phonetics
        .iter()
        .find_map(|p| non_empty(p.audio.as_deref()));
    Ok(DefinitionRecord {
        word: non_empty(entry.word.as_deref()).unwrap_or_else(|| word.to_string()),
        phonetic,
        audio_url,
        part_of_speech: non_empty(meaning.part_of_speech.as_deref()),
        definition,
    })
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAT: &str = r#"[
        {
            "word": "cat",
            "phonetic": "/kat/",
            "phonetics": [
                { "audio": "" },
                { "text": "/kæt/", "audio": "https://example.com/cat-uk.mp3" },
                { "text": "/kæt/", "audio": "https://example.com/cat-us.mp3" }
            ],
            "meanings": [
                {
                    "partOfSpeech": "noun",
                    "definitions": [
                        { "definition": "A small domesticated carnivorous mammal.", "synonyms": [] },
                        { "definition": "A person." }
                    ]
                },
                {
                    "partOfSpeech": "verb",
                    "definitions": [{ "definition": "To hoist the anchor." }]
                }
            ]
        },
        { "word": "cat", "meanings": [] }
    ]"#;

    #[test]
    fn test_parse_first_entry_meaning_definition() {
        let record = parse_entries("cat", CAT).unwrap();
        assert_eq!(record.word, "cat");
        assert_eq!(record.phonetic.as_deref(), Some("/kæt/"));
        assert_eq!(
            record.audio_url.as_deref(),
            Some("https://example.com/cat-uk.mp3")
        );
        assert_eq!(record.part_of_speech.as_deref(), Some("noun"));
        assert_eq!(record.definition, "A small domesticated carnivorous mammal.");
    }

    #[test]
    fn test_empty_list_is_not_found() {
        assert_eq!(parse_entries("xyzzy", "[]"), Err(FetchError::NotFound));
    }

    #[test]
    fn test_no_meanings_is_malformed() {
        let body = r#"[{ "word": "cat", "phonetics": [] }]"#;
        assert!(matches!(
            parse_entries("cat", body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_no_definitions_is_malformed() {
        let body = r#"[{ "word": "cat", "meanings": [{ "partOfSpeech": "noun", "definitions": [] }] }]"#;
        assert!(matches!(
            parse_entries("cat", body),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_not_an_array_is_malformed() {
        let body = r#"{ "title": "No Definitions Found" }"#;
        assert!(matches!(
            parse_entries("cat", body),
            Err(FetchError::Malformed(_))
        ));
        assert!(matches!(
            parse_entries("cat", "<html>"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn test_optional_fields_missing() {
        let body = r#"[{ "meanings": [{ "definitions": [{ "definition": "A thing." }] }] }]"#;
        let record = parse_entries("thing", body).unwrap();
        assert_eq!(record.word, "thing");
        assert_eq!(record.phonetic, None);
        assert_eq!(record.audio_url, None);
        assert_eq!(record.part_of_speech, None);
        assert_eq!(record.definition, "A thing.");
    }

    #[test]
    fn test_falls_back_to_entry_phonetic() {
        let body = r#"[{ "word": "ox", "phonetic": "/ɒks/", "phonetics": [{ "audio": "" }], "meanings": [{ "definitions": [{ "definition": "A bovine." }] }] }]"#;
        let record = parse_entries("ox", body).unwrap();
        assert_eq!(record.phonetic.as_deref(), Some("/ɒks/"));
        assert_eq!(record.audio_url, None);
    }
}
