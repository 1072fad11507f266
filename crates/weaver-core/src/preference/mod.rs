//! Deterministic preference scoring: answers -> category weights -> ranking -> rationale.

pub mod domain;
mod explain;
mod model;
mod ranking;
mod rules;
mod table;

#[cfg(test)]
mod tests;

pub use domain::{
    Answer, AnswerSet, Category, CategoryScore, CategoryScoreVector, Question, QuestionCatalog,
    QuestionId, Ranking,
};
pub use explain::explain;
pub use model::{BuiltinModel, ModelError, ScoringModel, ScoringModelDocument};
pub use ranking::{rank, BLEND_TOLERANCE};
pub use table::ScoreTable;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::sampling::{DailyPick, DailyPicker};

/// Stateless engine applying one scoring model to answer sets.
#[derive(Debug, Clone)]
pub struct PreferenceEngine {
    model: Arc<ScoringModel>,
}

impl PreferenceEngine {
    pub fn new(model: ScoringModel) -> Self {
        Self {
            model: Arc::new(model),
        }
    }

    pub fn builtin(model: BuiltinModel) -> Result<Self, ModelError> {
        ScoringModel::builtin(model).map(Self::new)
    }

    pub fn model(&self) -> &ScoringModel {
        &self.model
    }

    pub fn score(&self, answers: &AnswerSet) -> CategoryScoreVector {
        rules::score_answers(answers, &self.model).0
    }

    pub fn rank(&self, vector: &CategoryScoreVector) -> Ranking {
        rank(
            vector,
            self.model.categories(),
            self.model.blend_threshold(),
        )
    }

    pub fn explain(&self, ranking: &Ranking) -> String {
        explain(ranking, self.model.templates())
    }

    /// Scores, ranks, and explains in one pass, keeping the contribution trail.
    pub fn evaluate(&self, answers: &AnswerSet) -> Recommendation {
        let (vector, contributions) = rules::score_answers(answers, &self.model);
        let ranking = self.rank(&vector);
        let rationale = self.explain(&ranking);
        let catalog_keys = ranking
            .primary
            .iter()
            .filter_map(|category| self.model.catalog_key(category))
            .map(str::to_string)
            .collect();

        Recommendation {
            model: self.model.name().to_string(),
            ranking,
            rationale,
            contributions,
            catalog_keys,
        }
    }

    /// One pooled item per primary category for `date`, recorded in the picker's history.
    pub fn daily_picks(
        &self,
        ranking: &Ranking,
        date: NaiveDate,
        picker: &DailyPicker,
    ) -> Vec<DailyPick> {
        ranking
            .primary
            .iter()
            .filter_map(|category| {
                let key = format!("{}:{}", self.model.name(), category);
                picker.pick(&key, date, self.model.pool(category))
            })
            .collect()
    }
}

/// Single weight flowing from an answer choice into a category, for transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContribution {
    pub question: QuestionId,
    pub choice: String,
    pub category: Category,
    pub weight: f64,
}

/// Ranking plus the rationale and trail that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub model: String,
    pub ranking: Ranking,
    pub rationale: String,
    pub contributions: Vec<ScoreContribution>,
    /// External catalog identifiers (e.g. TMDB genre ids) of the primary categories.
    pub catalog_keys: Vec<String>,
}
