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

//! Test helpers.

use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use tempfile::TempDir;
use tempfile::tempdir;
use tokio::sync::watch;

use crate::error::Fallible;
use crate::lookup::fetcher::DefinitionFetcher;
use crate::types::definition::DefinitionRecord;
use crate::types::definition::FetchError;
use crate::types::word::Word;

/// A word the fake dictionary has never heard of.
pub const UNKNOWN_WORD: &str = "xyzzynotaword";

/// Creates an empty temporary directory. The directory is deleted when the
/// returned handle is dropped.
pub fn create_tmp_directory() -> Fallible<(TempDir, PathBuf)> {
    let dir = tempdir()?;
    let path = dir.path().canonicalize()?;
    Ok((dir, path))
}

/// An in-process dictionary that records every lookup.
///
/// Every word resolves to `"definition of <word>"`, except [`UNKNOWN_WORD`],
/// which is not found. A gated fetcher holds all lookups until
/// [`FakeFetcher::release`] is called.
#[derive(Clone)]
pub struct FakeFetcher {
    inner: Arc<FakeInner>,
}

struct FakeInner {
    calls: Mutex<HashMap<String, usize>>,
    fail_once: Mutex<HashSet<String>>,
    panic_once: Mutex<HashSet<String>>,
    gate: watch::Sender<bool>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::with_gate(true)
    }

    pub fn gated() -> Self {
        Self::with_gate(false)
    }

    fn with_gate(open: bool) -> Self {
        let (gate, _) = watch::channel(open);
        Self {
            inner: Arc::new(FakeInner {
                calls: Mutex::new(HashMap::new()),
                fail_once: Mutex::new(HashSet::new()),
                panic_once: Mutex::new(HashSet::new()),
                gate,
            }),
        }
    }

    /// Let held lookups complete, and stop holding new ones.
    pub fn release(&self) {
        self.inner.gate.send_replace(true);
    }

    /// Make the next lookup of `word` fail with a network error.
    pub fn fail_once(&self, word: &str) {
        self.inner.fail_once.lock().unwrap().insert(word.to_string());
    }

    /// Make the next lookup of `word` panic instead of returning.
    pub fn panic_once(&self, word: &str) {
        self.inner.panic_once.lock().unwrap().insert(word.to_string());
    }

    /// How many times `word` has been looked up.
    pub fn calls(&self, word: &str) -> usize {
        self.inner
            .calls
            .lock()
            .unwrap()
            .get(word)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.inner.calls.lock().unwrap().values().sum()
    }
}

impl DefinitionFetcher for FakeFetcher {
    async fn fetch(&self, word: &Word) -> Result<DefinitionRecord, FetchError> {
        let word = word.as_str().to_string();
        {
            let mut calls = self.inner.calls.lock().unwrap();
            *calls.entry(word.clone()).or_insert(0) += 1;
        }
        let mut gate = self.inner.gate.subscribe();
        let opened = gate.wait_for(|open| *open).await.is_ok();
        if !opened {
            return Err(FetchError::Network("gate closed".to_string()));
        }
        let panic = self.inner.panic_once.lock().unwrap().remove(&word);
        if panic {
            panic!("dictionary crashed on {word}");
        }
        let fail = self.inner.fail_once.lock().unwrap().remove(&word);
        if fail {
            return Err(FetchError::Network("connection reset".to_string()));
        }
        if word == UNKNOWN_WORD {
            return Err(FetchError::NotFound);
        }
        Ok(DefinitionRecord {
            definition: format!("definition of {word}"),
            phonetic: Some(format!("/{word}/")),
            audio_url: None,
            part_of_speech: Some("noun".to_string()),
            word,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_directory() -> Fallible<()> {
        let (_dir, path) = create_tmp_directory()?;
        assert!(path.is_dir());
        Ok(())
    }
}
