use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Labeled output class the engine ranks (a genre, a mood, a content bucket).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A prompt with a closed, ordered set of allowed choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub prompt: String,
    pub choices: Vec<String>,
    #[serde(default)]
    pub multiple: bool,
}

impl Question {
    pub fn allows(&self, choice: &str) -> bool {
        self.choices.iter().any(|allowed| allowed == choice)
    }
}

/// Ordered questionnaire definition, fixed for the lifetime of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub(crate) fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// A single choice, or the set of choices picked on a multi-select question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multiple(Vec<String>),
}

impl Answer {
    pub fn choices(&self) -> &[String] {
        match self {
            Answer::Single(choice) => std::slice::from_ref(choice),
            Answer::Multiple(choices) => choices,
        }
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Answer::Single(value.to_string())
    }
}

/// Caller-supplied answers for one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<QuestionId, Answer>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, question: impl Into<String>, choice: impl Into<String>) -> Self {
        self.insert(QuestionId::new(question), Answer::Single(choice.into()));
        self
    }

    pub fn select_many<I, S>(mut self, question: impl Into<String>, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        self.insert(QuestionId::new(question), Answer::Multiple(choices));
        self
    }

    pub fn insert(&mut self, question: QuestionId, answer: Answer) {
        self.answers.insert(question, answer);
    }

    pub fn get(&self, question: &QuestionId) -> Option<&Answer> {
        self.answers.get(question)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.answers.iter()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    pub score: f64,
}

/// Accumulated weight per category. Holds every category of the model, in priority order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CategoryScoreVector {
    scores: Vec<CategoryScore>,
}

impl CategoryScoreVector {
    pub(crate) fn zeroed(categories: &[Category]) -> Self {
        Self {
            scores: categories
                .iter()
                .map(|category| CategoryScore {
                    category: category.clone(),
                    score: 0.0,
                })
                .collect(),
        }
    }

    /// Builds a vector from precomputed scores, keeping the first score seen per category.
    pub fn from_scores<I, C>(scores: I) -> Self
    where
        I: IntoIterator<Item = (C, f64)>,
        C: Into<Category>,
    {
        let mut vector = Self::default();
        for (category, score) in scores {
            let category = category.into();
            if vector.position(category.as_str()).is_none() {
                vector.scores.push(CategoryScore { category, score });
            }
        }
        vector
    }

    pub(crate) fn add(&mut self, category: &Category, weight: f64) {
        match self.position(category.as_str()) {
            Some(index) => self.scores[index].score += weight,
            None => self.scores.push(CategoryScore {
                category: category.clone(),
                score: weight,
            }),
        }
    }

    fn position(&self, category: &str) -> Option<usize> {
        self.scores
            .iter()
            .position(|entry| entry.category.as_str() == category)
    }

    /// Score for `category`, 0.0 when the category is unknown.
    pub fn get(&self, category: &str) -> f64 {
        self.position(category)
            .map(|index| self.scores[index].score)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.scores.iter()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn is_all_zero(&self) -> bool {
        self.scores.iter().all(|entry| entry.score == 0.0)
    }
}

/// Categories sorted by descending score, with the primary set of one or two.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    pub primary: Vec<Category>,
    pub ordered: Vec<CategoryScore>,
    pub blended: bool,
}

impl Ranking {
    pub fn top(&self) -> Option<&Category> {
        self.primary.first()
    }

    /// Second category of a blended profile.
    pub fn secondary(&self) -> Option<&Category> {
        if self.blended {
            self.primary.get(1)
        } else {
            None
        }
    }

    pub fn score_of(&self, category: &str) -> f64 {
        self.ordered
            .iter()
            .find(|entry| entry.category.as_str() == category)
            .map(|entry| entry.score)
            .unwrap_or(0.0)
    }
}
