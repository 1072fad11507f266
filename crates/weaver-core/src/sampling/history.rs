use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// No-repeat window and retention for recorded picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPolicy {
    pub no_repeat_days: u32,
    pub retention_days: u32,
}

impl Default for HistoryPolicy {
    fn default() -> Self {
        Self {
            no_repeat_days: 14,
            retention_days: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    pub date: NaiveDate,
    pub key: String,
    pub item: String,
}

/// Items handed out per pool key and day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageHistory {
    #[serde(default)]
    records: Vec<UsageRecord>,
}

impl UsageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[UsageRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records `item` for `key` on `date`, replacing an earlier pick for the same day.
    pub fn record(&mut self, date: NaiveDate, key: &str, item: &str) {
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|record| record.date == date && record.key == key)
        {
            existing.item = item.to_string();
            return;
        }

        self.records.push(UsageRecord {
            date,
            key: key.to_string(),
            item: item.to_string(),
        });
    }

    pub fn item_on(&self, date: NaiveDate, key: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.date == date && record.key == key)
            .map(|record| record.item.as_str())
    }

    /// Items used for `key` on the `window_days` days before `today`.
    pub fn used_within(&self, key: &str, today: NaiveDate, window_days: u32) -> HashSet<String> {
        self.records
            .iter()
            .filter(|record| record.key == key)
            .filter(|record| {
                let days_ago = (today - record.date).num_days();
                days_ago >= 1 && days_ago <= i64::from(window_days)
            })
            .map(|record| record.item.clone())
            .collect()
    }

    /// Drops records older than `retention_days` before `today`, returning how many were
    /// removed. Records dated after `today` are kept.
    pub fn prune(&mut self, today: NaiveDate, retention_days: u32) -> usize {
        let before = self.records.len();
        self.records
            .retain(|record| (today - record.date).num_days() <= i64::from(retention_days));
        before - self.records.len()
    }
}
