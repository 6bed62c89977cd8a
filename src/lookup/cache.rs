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

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use tokio::sync::watch;

use crate::lookup::fetcher::DefinitionFetcher;
use crate::types::definition::FetchError;
use crate::types::definition::FetchOutcome;
use crate::types::word::Word;

/// An in-memory, session-lifetime cache of word lookups.
///
/// For a given word there is at most one lookup in flight, no matter how many
/// callers ask for it concurrently. Each entry is a watch channel: the task
/// running the lookup owns the sender and publishes exactly one terminal
/// outcome, and every caller waits on a clone of the receiver.
///
/// Entries are never evicted. Failed entries stay failed until
/// [`DefinitionCache::retry`] is called.
pub struct DefinitionCache<F> {
    inner: Arc<Inner<F>>,
}

struct Inner<F> {
    fetcher: F,
    entries: Mutex<HashMap<Word, watch::Receiver<FetchOutcome>>>,
    /// Total number of lookups issued.
    fetches: AtomicUsize,
}

impl<F> Clone for DefinitionCache<F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<F: DefinitionFetcher> DefinitionCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                entries: Mutex::new(HashMap::new()),
                fetches: AtomicUsize::new(0),
            }),
        }
    }

    /// The current state of a word's entry, or `None` if it was never
    /// requested.
    pub fn get(&self, word: &Word) -> Option<FetchOutcome> {
        let entries = self.acquire();
        entries.get(word).map(current)
    }

    /// Start looking a word up, unless an entry for it already exists. Does
    /// not wait. Must be called from within a tokio runtime.
    pub fn request(&self, word: &Word) {
        let _ = self.entry(word);
    }

    /// Wait for a word's outcome, starting the lookup if needed. Never
    /// returns `Pending`.
    pub async fn ensure(&self, word: &Word) -> FetchOutcome {
        let rx = self.entry(word);
        settle(rx).await
    }

    /// Discard a failed outcome and look the word up again.
    ///
    /// A pending entry is joined rather than restarted, and a resolved entry
    /// is returned as is: neither triggers a new lookup.
    pub async fn retry(&self, word: &Word) -> FetchOutcome {
        self.request_retry(word);
        self.ensure(word).await
    }

    /// Like [`DefinitionCache::retry`], but does not wait.
    pub fn request_retry(&self, word: &Word) {
        {
            let mut entries = self.acquire();
            let failed = entries
                .get(word)
                .is_some_and(|rx| current(rx).is_failed());
            if failed {
                log::debug!("Retrying lookup for {word:?}.");
                entries.remove(word);
            }
        }
        self.request(word);
    }

    /// How many lookups this cache has issued.
    pub fn fetch_count(&self) -> usize {
        self.inner.fetches.load(Ordering::SeqCst)
    }

    /// Return the receiver for a word's entry, creating the entry and
    /// spawning its lookup if there is none. The check and the insert happen
    /// under one lock.
    fn entry(&self, word: &Word) -> watch::Receiver<FetchOutcome> {
        let mut entries = self.acquire();
        if let Some(rx) = entries.get(word) {
            log::debug!("Joining existing entry for {word:?}.");
            return rx.clone();
        }
        let (tx, rx) = watch::channel(FetchOutcome::Pending);
        entries.insert(word.clone(), rx.clone());
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);
        log::debug!("Looking up {word:?}.");
        let inner = self.inner.clone();
        let word = word.clone();
        tokio::spawn(async move {
            let outcome: FetchOutcome = inner.fetcher.fetch(&word).await.into();
            match &outcome {
                FetchOutcome::Failed(e) => log::debug!("Lookup for {word:?} failed: {e}"),
                _ => log::debug!("Lookup for {word:?} resolved."),
            }
            // Nobody listening is fine: the receiver in the map keeps the
            // channel open for as long as the entry exists.
            let _ = tx.send(outcome);
        });
        rx
    }

    fn acquire(&self) -> MutexGuard<'_, HashMap<Word, watch::Receiver<FetchOutcome>>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// The outcome an entry currently shows. An entry still pending after its
/// lookup task is gone will never resolve, so it reads as failed.
fn current(rx: &watch::Receiver<FetchOutcome>) -> FetchOutcome {
    let outcome = (*rx.borrow()).clone();
    if outcome.is_pending() && rx.has_changed().is_err() {
        abandoned()
    } else {
        outcome
    }
}

/// Wait until the entry leaves `Pending`.
async fn settle(mut rx: watch::Receiver<FetchOutcome>) -> FetchOutcome {
    match rx.wait_for(|outcome| !outcome.is_pending()).await {
        Ok(outcome) => (*outcome).clone(),
        Err(_) => abandoned(),
    }
}

fn abandoned() -> FetchOutcome {
    FetchOutcome::Failed(FetchError::Network(
        "lookup task ended without a result".to_string(),
    ))
}
