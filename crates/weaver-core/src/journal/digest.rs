use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::domain::JournalEntry;

const TOP_N: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Week,
    Month,
    Year,
}

impl Period {
    pub const fn ordered() -> [Self; 3] {
        [Self::Week, Self::Month, Self::Year]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Week => "주간",
            Self::Month => "월간",
            Self::Year => "연간",
        }
    }

    /// Group key; sorts chronologically as a string within each period kind.
    pub fn key(self, created: &NaiveDateTime) -> String {
        let pattern = match self {
            Self::Week => "%Y-W%U",
            Self::Month => "%Y-%m",
            Self::Year => "%Y",
        };
        created.format(pattern).to_string()
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "week" | "weekly" => Some(Self::Week),
            "month" | "monthly" => Some(Self::Month),
            "year" | "yearly" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Most frequent activities and keywords of the latest period with entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodDigest {
    pub period: Period,
    pub period_label: &'static str,
    pub key: String,
    pub entry_count: usize,
    pub top_activities: Vec<String>,
    pub top_keywords: Vec<String>,
}

pub fn digest(entries: &[JournalEntry], period: Period) -> Option<PeriodDigest> {
    let mut groups: BTreeMap<String, Vec<&JournalEntry>> = BTreeMap::new();
    for entry in entries {
        groups
            .entry(period.key(&entry.created))
            .or_default()
            .push(entry);
    }

    let (key, latest) = groups.into_iter().next_back()?;

    let activities = latest
        .iter()
        .flat_map(|entry| entry.answers.activities.iter())
        .map(|activity| activity.label().to_string());
    let keywords = latest
        .iter()
        .map(|entry| entry.answers.one_word.trim())
        .filter(|word| !word.is_empty())
        .map(str::to_string);

    Some(PeriodDigest {
        period,
        period_label: period.label(),
        key,
        entry_count: latest.len(),
        top_activities: most_common(activities, TOP_N),
        top_keywords: most_common(keywords, TOP_N),
    })
}

/// Top `n` values by count; equal counts keep first-seen order.
fn most_common(values: impl Iterator<Item = String>, n: usize) -> Vec<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.into_iter().take(n).map(|(value, _)| value).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::domain::{Activity, JournalAnswers};
    use chrono::NaiveDate;

    fn entry(date: (i32, u32, u32), activities: Vec<Activity>, word: &str) -> JournalEntry {
        JournalEntry {
            created: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .expect("valid date")
                .and_hms_opt(21, 30, 0)
                .expect("valid time"),
            style_mode: Default::default(),
            special_question: None,
            answers: JournalAnswers {
                activities,
                one_word: word.to_string(),
                ..Default::default()
            },
            mood: None,
        }
    }

    #[test]
    fn period_keys_follow_calendar_formats() {
        let created = NaiveDate::from_ymd_opt(2025, 3, 14)
            .expect("valid date")
            .and_hms_opt(9, 0, 0)
            .expect("valid time");

        assert_eq!(Period::Week.key(&created), "2025-W10");
        assert_eq!(Period::Month.key(&created), "2025-03");
        assert_eq!(Period::Year.key(&created), "2025");
    }

    #[test]
    fn digest_summarizes_only_the_latest_group() {
        let entries = vec![
            entry((2025, 2, 3), vec![Activity::Study], "피곤"),
            entry((2025, 3, 3), vec![Activity::Exercise, Activity::Rest], "뿌듯"),
            entry((2025, 3, 10), vec![Activity::Rest, Activity::Work], "뿌듯"),
            entry((2025, 3, 12), vec![Activity::Rest, Activity::Exercise], "평온"),
        ];

        let digest = digest(&entries, Period::Month).expect("entries present");

        assert_eq!(digest.key, "2025-03");
        assert_eq!(digest.entry_count, 3);
        assert_eq!(digest.top_activities, vec!["휴식", "운동", "업무"]);
        assert_eq!(digest.top_keywords, vec!["뿌듯", "평온"]);
    }

    #[test]
    fn digest_of_nothing_is_none() {
        assert!(digest(&[], Period::Year).is_none());
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let ranked = most_common(
            ["b", "a", "c", "a", "b", "d"].iter().map(|s| s.to_string()),
            3,
        );
        assert_eq!(ranked, vec!["b", "a", "c"]);
    }
}
