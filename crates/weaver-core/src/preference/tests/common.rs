use crate::preference::{
    BuiltinModel, Category, PreferenceEngine, Question, QuestionId, ScoreTable, ScoringModel,
    ScoringModelDocument,
};
use std::collections::BTreeMap;

pub(super) fn movie_engine() -> PreferenceEngine {
    PreferenceEngine::builtin(BuiltinModel::MovieQuiz).expect("builtin movie model is valid")
}

pub(super) fn categories(labels: &[&str]) -> Vec<Category> {
    labels.iter().map(|label| Category::new(*label)).collect()
}

/// Three-category model small enough to reason about by hand.
pub(super) fn tiny_document() -> ScoringModelDocument {
    let weights = ScoreTable::new()
        .with("비", "드라마", 1.0)
        .with("비", "코미디", 0.2)
        .with("해", "코미디", 1.0)
        .with("해", "액션", 0.5)
        .with("눈", "액션", 1.0)
        .with("눈", "드라마", 0.5);

    let templates: BTreeMap<Category, String> = [
        ("드라마", "감정선"),
        ("코미디", "웃음"),
        ("액션", "속도감"),
    ]
    .into_iter()
    .map(|(category, phrase)| (Category::new(category), phrase.to_string()))
    .collect();

    ScoringModelDocument {
        name: "tiny".to_string(),
        categories: categories(&["드라마", "코미디", "액션"]),
        blend_threshold: 0.8,
        questions: vec![Question {
            id: QuestionId::new("weather"),
            prompt: "오늘 날씨는?".to_string(),
            choices: vec!["비".to_string(), "해".to_string(), "눈".to_string()],
            multiple: true,
        }],
        weights,
        templates,
        catalog_keys: BTreeMap::new(),
        pools: BTreeMap::new(),
    }
}

pub(super) fn tiny_engine() -> PreferenceEngine {
    PreferenceEngine::new(ScoringModel::from_document(tiny_document()).expect("tiny model valid"))
}
