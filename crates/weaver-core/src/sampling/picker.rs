use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use super::history::{HistoryPolicy, UsageHistory};
use super::store::HistoryStore;
use super::{daily_seed, sample_with_history};

/// One item handed out for a pool key on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPick {
    pub key: String,
    pub date: NaiveDate,
    pub item: String,
    /// The no-repeat filter emptied the pool and the full pool was used instead.
    pub fallback: bool,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// History-aware daily selection. Load, pick, record, prune, and save run as one
/// critical section per picker.
///
/// Retention is measured from the picker's clock, never from the requested date, so a pick
/// for a far-off date cannot expire anyone else's history.
pub struct DailyPicker {
    store: Arc<dyn HistoryStore>,
    policy: HistoryPolicy,
    clock: fn() -> NaiveDate,
    lock: Mutex<()>,
}

impl std::fmt::Debug for DailyPicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyPicker")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl DailyPicker {
    pub fn new(store: Arc<dyn HistoryStore>, policy: HistoryPolicy) -> Self {
        Self {
            store,
            policy,
            clock: local_today,
            lock: Mutex::new(()),
        }
    }

    /// Replaces the wall clock used for retention pruning.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn policy(&self) -> HistoryPolicy {
        self.policy
    }

    /// Picks the item of `pool` for `key` on `date`. Re-picking the same day returns the
    /// recorded item while it is still in the pool.
    pub fn pick(&self, key: &str, date: NaiveDate, pool: &[String]) -> Option<DailyPick> {
        if pool.is_empty() {
            debug!(key, "empty pool; nothing to pick");
            return None;
        }

        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        // An unreadable store is picked around but never overwritten.
        let (mut history, writable) = match self.store.load() {
            Ok(history) => (history, true),
            Err(err) => {
                warn!(error = %err, "pick history unavailable; continuing without it");
                (UsageHistory::default(), false)
            }
        };

        if let Some(item) = history
            .item_on(date, key)
            .filter(|item| pool.iter().any(|candidate| candidate == item))
        {
            return Some(DailyPick {
                key: key.to_string(),
                date,
                item: item.to_string(),
                fallback: false,
            });
        }

        let recent = history.used_within(key, date, self.policy.no_repeat_days);
        let drawn = sample_with_history(&daily_seed(date, key), pool, &recent)?;
        let pick = DailyPick {
            key: key.to_string(),
            date,
            item: drawn.item.clone(),
            fallback: drawn.fallback,
        };

        if !writable {
            warn!(key, "pick history left untouched because it could not be read");
            return Some(pick);
        }

        history.record(date, key, &pick.item);
        let pruned = history.prune((self.clock)(), self.policy.retention_days);
        if pruned > 0 {
            debug!(pruned, "pruned expired pick history");
        }

        if let Err(err) = self.store.save(&history) {
            warn!(error = %err, key, "failed to persist pick history; returning pick anyway");
        }

        Some(pick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::{HistoryError, InMemoryHistoryStore, JsonFileHistoryStore};
    use std::fs::{self, OpenOptions};
    use std::io::Write;

    struct BrokenStore;

    impl HistoryStore for BrokenStore {
        fn load(&self) -> Result<UsageHistory, HistoryError> {
            Err(HistoryError::Unavailable("disk offline".to_string()))
        }

        fn save(&self, _history: &UsageHistory) -> Result<(), HistoryError> {
            Err(HistoryError::Unavailable("disk offline".to_string()))
        }
    }

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date") + chrono::Duration::days(offset)
    }

    fn fixed_picker(store: Arc<dyn HistoryStore>) -> DailyPicker {
        DailyPicker::new(store, HistoryPolicy::default()).with_clock(|| day(0))
    }

    fn pool() -> Vec<String> {
        ["색", "영화", "음식"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn repeated_pick_on_same_day_is_stable() {
        let store = Arc::new(InMemoryHistoryStore::default());
        let picker = fixed_picker(store.clone());

        let first = picker.pick("special_question", day(0), &pool()).expect("pick");
        let second = picker.pick("special_question", day(0), &pool()).expect("pick");

        assert_eq!(first, second);
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn consecutive_days_do_not_repeat_within_window() {
        let store = Arc::new(InMemoryHistoryStore::default());
        let picker = fixed_picker(store);

        let picks: Vec<String> = (0..3)
            .map(|offset| picker.pick("special_question", day(offset), &pool()).expect("pick").item)
            .collect();

        let mut unique = picks.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3, "three days should use three distinct items: {picks:?}");
    }

    #[test]
    fn exhausted_pool_falls_back_and_flags_it() {
        let mut history = UsageHistory::new();
        for (offset, item) in pool().iter().enumerate() {
            history.record(day(-(offset as i64) - 1), "special_question", item);
        }
        let store = Arc::new(InMemoryHistoryStore::with_history(history));
        let picker = fixed_picker(store);

        let pick = picker.pick("special_question", day(0), &pool()).expect("pick");
        assert!(pick.fallback);
    }

    #[test]
    fn two_of_three_used_leaves_only_the_unused_item() {
        let mut history = UsageHistory::new();
        history.record(day(-1), "special_question", "색");
        history.record(day(-5), "special_question", "영화");
        let store = Arc::new(InMemoryHistoryStore::with_history(history));
        let picker = fixed_picker(store);

        let pick = picker.pick("special_question", day(0), &pool()).expect("pick");
        assert_eq!(pick.item, "음식");
        assert!(!pick.fallback);
    }

    #[test]
    fn store_failures_are_swallowed() {
        let picker = fixed_picker(Arc::new(BrokenStore));

        let pick = picker.pick("special_question", day(0), &pool());
        assert!(pick.is_some());
    }

    #[test]
    fn saving_prunes_expired_records() {
        let mut history = UsageHistory::new();
        history.record(day(-90), "special_question", "색");
        let store = Arc::new(InMemoryHistoryStore::with_history(history));
        let picker = fixed_picker(store.clone());

        picker.pick("special_question", day(0), &pool()).expect("pick");

        let saved = store.snapshot();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.records()[0].date, day(0));
    }

    #[test]
    fn far_future_pick_keeps_recent_history() {
        let store = Arc::new(InMemoryHistoryStore::default());
        let picker = fixed_picker(store.clone());
        for offset in 0..3 {
            picker.pick("special_question", day(offset), &pool()).expect("pick");
        }
        let recent_before = store.snapshot().used_within("special_question", day(3), 14);

        picker
            .pick("special_question", day(5000), &pool())
            .expect("pick");

        let saved = store.snapshot();
        assert_eq!(saved.len(), 4);
        assert_eq!(saved.used_within("special_question", day(3), 14), recent_before);
        assert_eq!(recent_before.len(), 3);
    }

    #[test]
    fn unreadable_history_file_is_not_overwritten() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");
        let picker = fixed_picker(Arc::new(JsonFileHistoryStore::new(&path)));
        for offset in 0..3 {
            picker.pick("special_question", day(offset), &pool()).expect("pick");
        }

        OpenOptions::new()
            .append(true)
            .open(&path)
            .and_then(|mut file| file.write_all(b"x"))
            .expect("corrupt history file");
        let corrupted = fs::read(&path).expect("read history");

        let pick = picker.pick("special_question", day(3), &pool());

        assert!(pick.is_some());
        assert_eq!(fs::read(&path).expect("read history"), corrupted);
    }
}
