use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use super::digest::{digest, Period, PeriodDigest};
use super::domain::{
    find_emoji, EntrySubmission, JournalAnswers, JournalEntry, MoodSummary, Profile, ProfileDraft,
};
use super::prompts::{special_question_pool, SPECIAL_QUESTION_KEY};
use super::repository::{JournalRepository, RepositoryError};
use crate::preference::{AnswerSet, PreferenceEngine};
use crate::sampling::{DailyPick, DailyPicker};

/// Question ids of the mood model fed from a journal entry.
pub const MOOD_EMOJI_QUESTION: &str = "emoji";
pub const MOOD_ACTIVITY_QUESTION: &str = "activities";

const MAX_AGE: u8 = 120;

/// Service composing the journal repository, the daily picker, and the mood engine.
pub struct JournalService<R> {
    repository: Arc<R>,
    picker: Arc<DailyPicker>,
    mood: PreferenceEngine,
    questions: Vec<String>,
}

impl<R> JournalService<R>
where
    R: JournalRepository + 'static,
{
    pub fn new(repository: Arc<R>, picker: Arc<DailyPicker>, mood: PreferenceEngine) -> Self {
        Self {
            repository,
            picker,
            mood,
            questions: special_question_pool(),
        }
    }

    /// Deterministic special question for `date`, avoiding recent repeats.
    pub fn question_of_the_day(&self, date: NaiveDate) -> Option<DailyPick> {
        self.picker.pick(SPECIAL_QUESTION_KEY, date, &self.questions)
    }

    /// Reads the mood of an entry and picks its song of the day.
    pub fn mood_for(&self, answers: &JournalAnswers, date: NaiveDate) -> Option<MoodSummary> {
        let mut mood_answers = AnswerSet::new();
        if let Some(option) = answers.emoji.as_deref().and_then(find_emoji) {
            mood_answers = mood_answers.select(MOOD_EMOJI_QUESTION, option.label);
        }
        if !answers.activities.is_empty() {
            mood_answers = mood_answers.select_many(
                MOOD_ACTIVITY_QUESTION,
                answers.activities.iter().map(|activity| activity.label()),
            );
        }
        if mood_answers.is_empty() {
            return None;
        }

        let recommendation = self.mood.evaluate(&mood_answers);
        let song = self
            .mood
            .daily_picks(&recommendation.ranking, date, &self.picker)
            .into_iter()
            .next()
            .map(|pick| pick.item);

        Some(MoodSummary {
            primary: recommendation.ranking.primary,
            rationale: recommendation.rationale,
            song,
        })
    }

    /// Validates and stores a finished journal flow.
    pub fn submit(
        &self,
        submission: EntrySubmission,
        now: NaiveDateTime,
    ) -> Result<JournalEntry, JournalError> {
        let EntrySubmission {
            style_mode,
            mut answers,
        } = submission;

        if let Some(raw) = answers.emoji.take() {
            let option = find_emoji(&raw).ok_or(JournalError::UnknownEmoji(raw))?;
            answers.emoji = Some(option.emoji.to_string());
        }

        let date = now.date();
        let special_question = self.question_of_the_day(date).map(|pick| pick.item);
        let mood = self.mood_for(&answers, date);

        let entry = JournalEntry {
            created: now,
            style_mode,
            special_question,
            answers,
            mood,
        };

        self.repository.append(&entry)?;
        info!(created = %entry.created, style = entry.style_mode.label(), "journal entry saved");
        Ok(entry)
    }

    pub fn entries(&self) -> Result<Vec<JournalEntry>, JournalError> {
        Ok(self.repository.entries()?)
    }

    pub fn digest(&self, period: Period) -> Result<Option<PeriodDigest>, JournalError> {
        let entries = self.repository.entries()?;
        Ok(digest(&entries, period))
    }

    /// Weekly, monthly, and yearly digests; empty when nothing was recorded.
    pub fn digests(&self) -> Result<Vec<PeriodDigest>, JournalError> {
        let entries = self.repository.entries()?;
        Ok(Period::ordered()
            .into_iter()
            .filter_map(|period| digest(&entries, period))
            .collect())
    }

    pub fn profile(&self) -> Result<Option<Profile>, JournalError> {
        Ok(self.repository.load_profile()?)
    }

    pub fn register(&self, draft: ProfileDraft, today: NaiveDate) -> Result<Profile, JournalError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(JournalError::InvalidProfile("name is required".to_string()));
        }
        if draft.age > MAX_AGE {
            return Err(JournalError::InvalidProfile(format!(
                "age must be between 0 and {MAX_AGE}"
            )));
        }

        let profile = Profile {
            name: name.to_string(),
            age: draft.age,
            gender: draft.gender,
            job: draft.job.trim().to_string(),
            created: today,
        };
        self.repository.save_profile(&profile)?;
        Ok(profile)
    }
}

/// Error raised by the journal service.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("'{0}' is not one of the mood emoji options")]
    UnknownEmoji(String),
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
