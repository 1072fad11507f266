use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::preference::Category;

/// Voice the daily prompts are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StyleMode {
    #[default]
    #[serde(rename = "친한친구")]
    CloseFriend,
    #[serde(rename = "반려동물")]
    Pet,
    #[serde(rename = "차분한 비서")]
    CalmAssistant,
    #[serde(rename = "인생의 멘토")]
    Mentor,
    #[serde(rename = "감성 에디터")]
    SentimentalEditor,
}

impl StyleMode {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::CloseFriend,
            Self::Pet,
            Self::CalmAssistant,
            Self::Mentor,
            Self::SentimentalEditor,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::CloseFriend => "친한친구",
            Self::Pet => "반려동물",
            Self::CalmAssistant => "차분한 비서",
            Self::Mentor => "인생의 멘토",
            Self::SentimentalEditor => "감성 에디터",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|mode| mode.label() == label.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    #[serde(rename = "공부")]
    Study,
    #[serde(rename = "업무")]
    Work,
    #[serde(rename = "운동")]
    Exercise,
    #[serde(rename = "휴식")]
    Rest,
    #[serde(rename = "약속")]
    Meetup,
    #[serde(rename = "창작")]
    Creating,
    #[serde(rename = "정리")]
    Tidying,
    #[serde(rename = "이동")]
    Commute,
    #[serde(rename = "소비")]
    Shopping,
    #[serde(rename = "회복")]
    Recovery,
}

impl Activity {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::Study,
            Self::Work,
            Self::Exercise,
            Self::Rest,
            Self::Meetup,
            Self::Creating,
            Self::Tidying,
            Self::Commute,
            Self::Shopping,
            Self::Recovery,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Study => "공부",
            Self::Work => "업무",
            Self::Exercise => "운동",
            Self::Rest => "휴식",
            Self::Meetup => "약속",
            Self::Creating => "창작",
            Self::Tidying => "정리",
            Self::Commute => "이동",
            Self::Shopping => "소비",
            Self::Recovery => "회복",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|activity| activity.label() == label.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodEmoji {
    pub emoji: &'static str,
    pub label: &'static str,
}

const fn mood(emoji: &'static str, label: &'static str) -> MoodEmoji {
    MoodEmoji { emoji, label }
}

pub const EMOJI_OPTIONS: [MoodEmoji; 20] = [
    mood("😀", "기쁨"),
    mood("🙂", "평온"),
    mood("😐", "무덤덤"),
    mood("😔", "우울"),
    mood("😢", "슬픔"),
    mood("😭", "벅참"),
    mood("😡", "분노"),
    mood("😤", "답답"),
    mood("😴", "피곤"),
    mood("😬", "불안"),
    mood("☀️", "맑음"),
    mood("🌙", "감성"),
    mood("🌧️", "침잠"),
    mood("🌿", "안정"),
    mood("🔥", "열정"),
    mood("⚡", "긴장"),
    mood("🧊", "냉정"),
    mood("🌊", "출렁임"),
    mood("🫧", "가벼움"),
    mood("🌸", "따뜻함"),
];

/// Looks up an emoji option by its glyph or its label.
pub fn find_emoji(value: &str) -> Option<MoodEmoji> {
    let value = value.trim();
    EMOJI_OPTIONS
        .into_iter()
        .find(|option| option.emoji == value || option.label == value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "남성")]
    Male,
    #[serde(rename = "여성")]
    Female,
    #[serde(rename = "선택하지 않음")]
    Unspecified,
}

/// Onboarding input before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDraft {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub job: String,
    pub created: NaiveDate,
}

/// Answers collected across the six journal steps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalAnswers {
    #[serde(default)]
    pub emoji: Option<String>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    #[serde(default)]
    pub one_word: String,
    #[serde(default)]
    pub moment: String,
    #[serde(default)]
    pub growth: String,
    #[serde(default)]
    pub special: String,
}

/// Mood reading derived from the emoji and activities of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSummary {
    pub primary: Vec<Category>,
    pub rationale: String,
    #[serde(default)]
    pub song: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub created: NaiveDateTime,
    #[serde(default)]
    pub style_mode: StyleMode,
    #[serde(default)]
    pub special_question: Option<String>,
    pub answers: JournalAnswers,
    #[serde(default)]
    pub mood: Option<MoodSummary>,
}

/// Client payload for a finished journal flow.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntrySubmission {
    #[serde(default)]
    pub style_mode: StyleMode,
    pub answers: JournalAnswers,
}
