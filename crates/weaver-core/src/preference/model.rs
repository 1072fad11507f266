use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{Category, Question, QuestionCatalog, QuestionId};
use super::table::ScoreTable;

/// Serialized form of a scoring model, as embedded or loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringModelDocument {
    pub name: String,
    /// Category universe in tie-break priority order.
    pub categories: Vec<Category>,
    pub blend_threshold: f64,
    pub questions: Vec<Question>,
    #[serde(default)]
    pub weights: ScoreTable,
    pub templates: BTreeMap<Category, String>,
    #[serde(default)]
    pub catalog_keys: BTreeMap<Category, String>,
    #[serde(default)]
    pub pools: BTreeMap<Category, Vec<String>>,
}

/// Models shipped inside the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    MovieQuiz,
    DailyMood,
}

impl BuiltinModel {
    const fn source(self) -> &'static str {
        match self {
            Self::MovieQuiz => include_str!("../../models/movie_quiz.json"),
            Self::DailyMood => include_str!("../../models/daily_mood.json"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::MovieQuiz => "movie_quiz",
            Self::DailyMood => "daily_mood",
        }
    }
}

/// Validated scoring configuration. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringModel {
    name: String,
    categories: Vec<Category>,
    catalog: QuestionCatalog,
    table: ScoreTable,
    blend_threshold: f64,
    templates: BTreeMap<Category, String>,
    catalog_keys: BTreeMap<Category, String>,
    pools: BTreeMap<Category, Vec<String>>,
}

impl ScoringModel {
    pub fn from_document(document: ScoringModelDocument) -> Result<Self, ModelError> {
        validate(&document)?;

        let ScoringModelDocument {
            name,
            categories,
            blend_threshold,
            questions,
            weights,
            templates,
            catalog_keys,
            pools,
        } = document;

        info!(
            model = %name,
            categories = categories.len(),
            questions = questions.len(),
            "scoring model loaded"
        );

        Ok(Self {
            name,
            categories,
            catalog: QuestionCatalog::new(questions),
            table: weights,
            blend_threshold,
            templates,
            catalog_keys,
            pools,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ModelError> {
        let document: ScoringModelDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn builtin(model: BuiltinModel) -> Result<Self, ModelError> {
        Self::from_json_str(model.source())
    }

    /// Swaps in a different score table, re-validating against the catalog and universe.
    pub fn with_score_table(self, table: ScoreTable) -> Result<Self, ModelError> {
        let mut document = self.into_document();
        document.weights = table;
        Self::from_document(document)
    }

    pub fn into_document(self) -> ScoringModelDocument {
        ScoringModelDocument {
            name: self.name,
            categories: self.categories,
            blend_threshold: self.blend_threshold,
            questions: self.catalog.questions().to_vec(),
            weights: self.table,
            templates: self.templates,
            catalog_keys: self.catalog_keys,
            pools: self.pools,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Category universe, in priority order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn blend_threshold(&self) -> f64 {
        self.blend_threshold
    }

    pub fn template(&self, category: &Category) -> Option<&str> {
        self.templates.get(category).map(String::as_str)
    }

    pub fn templates(&self) -> &BTreeMap<Category, String> {
        &self.templates
    }

    pub fn catalog_key(&self, category: &Category) -> Option<&str> {
        self.catalog_keys.get(category).map(String::as_str)
    }

    pub fn pool(&self, category: &Category) -> &[String] {
        self.pools
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn validate(document: &ScoringModelDocument) -> Result<(), ModelError> {
    if document.categories.is_empty() {
        return Err(ModelError::EmptyUniverse);
    }

    let mut universe = BTreeSet::new();
    for category in &document.categories {
        if !universe.insert(category) {
            return Err(ModelError::DuplicateCategory(category.clone()));
        }
    }

    if !document.blend_threshold.is_finite() || document.blend_threshold < 0.0 {
        return Err(ModelError::InvalidThreshold(document.blend_threshold));
    }

    let mut question_ids = HashSet::new();
    for question in &document.questions {
        if !question_ids.insert(&question.id) {
            return Err(ModelError::DuplicateQuestion(question.id.clone()));
        }
        if question.choices.is_empty() {
            return Err(ModelError::EmptyChoices(question.id.clone()));
        }

        let mut seen = HashSet::new();
        for choice in &question.choices {
            if !seen.insert(choice) {
                return Err(ModelError::DuplicateChoice {
                    question: question.id.clone(),
                    choice: choice.clone(),
                });
            }
            if !document.weights.contains(choice) {
                return Err(ModelError::MissingTableEntry {
                    question: question.id.clone(),
                    choice: choice.clone(),
                });
            }
        }
    }

    for (choice, weights) in document.weights.entries() {
        for (category, weight) in weights {
            if !universe.contains(category) {
                return Err(ModelError::UnknownTableCategory {
                    choice: choice.clone(),
                    category: category.clone(),
                });
            }
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ModelError::InvalidWeight {
                    choice: choice.clone(),
                    category: category.clone(),
                    weight: *weight,
                });
            }
        }
    }

    let reachable = document.weights.categories();
    for category in &document.categories {
        if !reachable.contains(category) {
            return Err(ModelError::UnreachableCategory(category.clone()));
        }
        if !document.templates.contains_key(category) {
            return Err(ModelError::MissingTemplate(category.clone()));
        }
    }

    let sections = [
        ("templates", document.templates.keys().collect::<Vec<_>>()),
        ("catalog_keys", document.catalog_keys.keys().collect()),
        ("pools", document.pools.keys().collect()),
    ];
    for (section, keys) in sections {
        if let Some(category) = keys.into_iter().find(|key| !universe.contains(key)) {
            return Err(ModelError::UnknownCategory {
                section,
                category: category.clone(),
            });
        }
    }

    Ok(())
}

/// Configuration-time failures. Raised once at load, never per request.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("failed to read scoring model at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("scoring model is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("score table CSV is invalid: {0}")]
    Csv(#[from] csv::Error),
    #[error("scoring model declares no categories")]
    EmptyUniverse,
    #[error("category '{0}' is declared more than once")]
    DuplicateCategory(Category),
    #[error("blend threshold must be a finite, non-negative number (got {0})")]
    InvalidThreshold(f64),
    #[error("question '{0}' is declared more than once")]
    DuplicateQuestion(QuestionId),
    #[error("question '{0}' has no choices")]
    EmptyChoices(QuestionId),
    #[error("question '{question}' lists choice '{choice}' twice")]
    DuplicateChoice { question: QuestionId, choice: String },
    #[error("choice '{choice}' of question '{question}' has no score table entry")]
    MissingTableEntry { question: QuestionId, choice: String },
    #[error("score table entry '{choice}' references unknown category '{category}'")]
    UnknownTableCategory { choice: String, category: Category },
    #[error("weight {weight} for '{choice}' -> '{category}' must be finite and non-negative")]
    InvalidWeight {
        choice: String,
        category: Category,
        weight: f64,
    },
    #[error("score table row '{choice}' -> '{category}' is missing a weight")]
    MissingWeight { choice: String, category: Category },
    #[error("category '{0}' never receives a contribution from the score table")]
    UnreachableCategory(Category),
    #[error("category '{0}' has no explanation template")]
    MissingTemplate(Category),
    #[error("{section} references unknown category '{category}'")]
    UnknownCategory {
        section: &'static str,
        category: Category,
    },
}
