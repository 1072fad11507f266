//! Daily Weaver journal: profile onboarding, the six-step entry flow, period digests, and
//! the special question of the day.

pub mod digest;
pub mod domain;
pub mod prompts;
pub mod repository;
pub mod router;
pub mod service;


pub use digest::{Period, PeriodDigest};
pub use domain::{
    find_emoji, Activity, EntrySubmission, Gender, JournalAnswers, JournalEntry, MoodEmoji,
    MoodSummary, Profile, ProfileDraft, StyleMode, EMOJI_OPTIONS,
};
pub use prompts::{special_question_pool, SPECIAL_QUESTIONS, SPECIAL_QUESTION_KEY};
pub use repository::{FileJournal, InMemoryJournal, JournalRepository, RepositoryError};
pub use router::journal_router;
pub use service::{JournalError, JournalService};
