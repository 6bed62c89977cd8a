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

use crate::error::Fallible;
use crate::store::KeyValueStore;
use crate::store::MemoryStore;
use crate::types::date::Date;

/// Storage key for the streak length.
const COUNT_KEY: &str = "streak";

/// Storage key for the day of the last review.
const LAST_REVIEW_KEY: &str = "lastReviewDate";

/// The number of consecutive days on which the user has reviewed a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakState {
    pub count: u32,
    pub last_review_day: Option<Date>,
}

impl StreakState {
    /// Apply a review on `today`. Returns whether anything changed.
    ///
    /// Reviewing twice on the same day counts once. Reviewing the day after
    /// the last review extends the streak; any longer gap starts over at 1.
    pub fn record_review(&mut self, today: Date) -> bool {
        match self.last_review_day {
            Some(last) if last == today => false,
            Some(last) if Some(last) == today.yesterday() => {
                self.count = self.count.saturating_add(1);
                self.last_review_day = Some(today);
                true
            }
            _ => {
                self.count = 1;
                self.last_review_day = Some(today);
                true
            }
        }
    }
}

/// A streak backed by a key/value store.
///
/// The state is read once on construction and written back after every
/// change. If the store fails, the tracker logs a warning and switches to an
/// in-memory store for the rest of the session.
pub struct StreakTracker {
    state: StreakState,
    store: Box<dyn KeyValueStore>,
    /// False once the tracker has fallen back to memory.
    durable: bool,
}

impl StreakTracker {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        match read_state(store.as_ref()) {
            Ok(state) => {
                log::debug!(
                    "Loaded streak: count={} last={:?}",
                    state.count,
                    state.last_review_day
                );
                Self {
                    state,
                    store,
                    durable: true,
                }
            }
            Err(e) => {
                log::warn!("Could not load the streak, keeping it in memory only: {e}");
                Self::in_memory()
            }
        }
    }

    /// A tracker that never outlives the process.
    pub fn in_memory() -> Self {
        Self {
            state: StreakState::default(),
            store: Box::new(MemoryStore::new()),
            durable: false,
        }
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    pub fn count(&self) -> u32 {
        self.state.count
    }

    pub fn is_durable(&self) -> bool {
        self.durable
    }

    pub fn record_review(&mut self, today: Date) {
        if !self.state.record_review(today) {
            return;
        }
        log::debug!("Streak is now {} (as of {today}).", self.state.count);
        if let Err(e) = write_state(self.store.as_ref(), self.state) {
            log::warn!("Could not save the streak, keeping it in memory only: {e}");
            self.store = Box::new(MemoryStore::new());
            self.durable = false;
            if let Err(e) = write_state(self.store.as_ref(), self.state) {
                log::warn!("Could not keep the streak in memory: {e}");
            }
        }
    }
}

fn read_state(store: &dyn KeyValueStore) -> Fallible<StreakState> {
    let count = match store.get(COUNT_KEY)? {
        Some(text) => text.trim().parse::<u32>()?,
        None => 0,
    };
    let last_review_day = match store.get(LAST_REVIEW_KEY)? {
        Some(text) => Some(Date::parse(&text)?),
        None => None,
    };
    Ok(StreakState {
        count,
        last_review_day,
    })
}

fn write_state(store: &dyn KeyValueStore, state: StreakState) -> Fallible<()> {
    let count = state.count.to_string();
    match state.last_review_day {
        Some(day) => {
            let day = day.to_string();
            store.set_many(&[(COUNT_KEY, &count), (LAST_REVIEW_KEY, &day)])
        }
        None => store.set(COUNT_KEY, &count),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::error::fail;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::new(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn state(count: u32, last: Option<Date>) -> StreakState {
        StreakState {
            count,
            last_review_day: last,
        }
    }

    #[test]
    fn test_first_review() {
        let mut s = StreakState::default();
        assert!(s.record_review(ymd(2024, 5, 1)));
        assert_eq!(s, state(1, Some(ymd(2024, 5, 1))));
    }

    #[test]
    fn test_same_day_is_idempotent() {
        let today = ymd(2024, 5, 1);
        let mut once = state(3, Some(ymd(2024, 4, 30)));
        once.record_review(today);
        for n in 1..5 {
            let mut many = state(3, Some(ymd(2024, 4, 30)));
            for _ in 0..n {
                many.record_review(today);
            }
            assert_eq!(many, once);
        }
        assert_eq!(once, state(4, Some(today)));
    }

    #[test]
    fn test_yesterday_increments() {
        let mut s = state(6, Some(ymd(2024, 2, 29)));
        assert!(s.record_review(ymd(2024, 3, 1)));
        assert_eq!(s.count, 7);
    }

    #[test]
    fn test_count_saturates() {
        let mut s = state(u32::MAX, Some(ymd(2024, 4, 30)));
        assert!(s.record_review(ymd(2024, 5, 1)));
        assert_eq!(s.count, u32::MAX);
    }

    #[test]
    fn test_gap_resets() {
        let mut s = state(6, Some(ymd(2024, 4, 28)));
        s.record_review(ymd(2024, 5, 1));
        assert_eq!(s, state(1, Some(ymd(2024, 5, 1))));
    }

    #[test]
    fn test_two_day_gap_resets() {
        let mut s = state(2, Some(ymd(2024, 4, 29)));
        s.record_review(ymd(2024, 5, 1));
        assert_eq!(s.count, 1);
    }

    #[test]
    fn test_consecutive_days_across_dst_change() {
        let mut s = StreakState::default();
        s.record_review(ymd(2024, 3, 9));
        s.record_review(ymd(2024, 3, 10));
        s.record_review(ymd(2024, 3, 11));
        assert_eq!(s.count, 3);
    }

    #[test]
    fn test_tracker_persists() -> Fallible<()> {
        let store = MemoryStore::new();
        let mut tracker = StreakTracker::load(Box::new(store.clone()));
        assert_eq!(tracker.count(), 0);
        tracker.record_review(ymd(2024, 5, 1));
        assert_eq!(store.get("streak")?.as_deref(), Some("1"));
        assert_eq!(store.get("lastReviewDate")?.as_deref(), Some("2024-05-01"));

        let mut tracker = StreakTracker::load(Box::new(store.clone()));
        assert_eq!(tracker.state(), state(1, Some(ymd(2024, 5, 1))));
        tracker.record_review(ymd(2024, 5, 2));
        assert_eq!(store.get("streak")?.as_deref(), Some("2"));
        Ok(())
    }

    #[test]
    fn test_corrupt_store_starts_fresh() -> Fallible<()> {
        let store = MemoryStore::new();
        store.set("streak", "lots")?;
        let tracker = StreakTracker::load(Box::new(store));
        assert_eq!(tracker.count(), 0);
        assert!(!tracker.is_durable());
        Ok(())
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Fallible<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Fallible<()> {
            fail("disk full")
        }

        fn set_many(&self, _pairs: &[(&str, &str)]) -> Fallible<()> {
            fail("disk full")
        }
    }

    #[test]
    fn test_write_failure_degrades_to_memory() {
        let mut tracker = StreakTracker::load(Box::new(BrokenStore));
        assert!(tracker.is_durable());
        tracker.record_review(ymd(2024, 5, 1));
        assert!(!tracker.is_durable());
        assert_eq!(tracker.count(), 1);
        tracker.record_review(ymd(2024, 5, 2));
        assert_eq!(tracker.count(), 2);
    }

    /// Accepts only whole-state writes, and records the keys of each one.
    #[derive(Clone, Default)]
    struct BatchOnlyStore {
        inner: MemoryStore,
        batches: std::sync::Arc<std::sync::Mutex<Vec<Vec<String>>>>,
    }

    impl KeyValueStore for BatchOnlyStore {
        fn get(&self, key: &str) -> Fallible<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Fallible<()> {
            fail("single writes are not allowed")
        }

        fn set_many(&self, pairs: &[(&str, &str)]) -> Fallible<()> {
            let keys = pairs.iter().map(|(k, _)| k.to_string()).collect();
            self.batches.lock().unwrap().push(keys);
            self.inner.set_many(pairs)
        }
    }

    #[test]
    fn test_count_and_day_written_together() -> Fallible<()> {
        let store = BatchOnlyStore::default();
        let mut tracker = StreakTracker::load(Box::new(store.clone()));
        tracker.record_review(ymd(2024, 5, 1));
        assert!(tracker.is_durable());
        assert_eq!(
            *store.batches.lock().unwrap(),
            vec![vec!["streak".to_string(), "lastReviewDate".to_string()]]
        );
        assert_eq!(store.get("streak")?.as_deref(), Some("1"));
        assert_eq!(store.get("lastReviewDate")?.as_deref(), Some("2024-05-01"));
        Ok(())
    }

    #[test]
    fn test_huge_stored_count_does_not_overflow() -> Fallible<()> {
        let store = MemoryStore::new();
        store.set_many(&[("streak", "4294967295"), ("lastReviewDate", "2024-04-30")])?;
        let mut tracker = StreakTracker::load(Box::new(store.clone()));
        tracker.record_review(ymd(2024, 5, 1));
        assert_eq!(tracker.count(), u32::MAX);
        assert_eq!(store.get("streak")?.as_deref(), Some("4294967295"));
        Ok(())
    }
}
