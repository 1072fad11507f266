use super::common::*;
use crate::preference::{BuiltinModel, Category, ModelError, ScoreTable, ScoringModel};

#[test]
fn builtin_models_load() {
    for builtin in [BuiltinModel::MovieQuiz, BuiltinModel::DailyMood] {
        let model = ScoringModel::builtin(builtin).expect("builtin model is valid");
        assert!(!model.categories().is_empty(), "{} has categories", builtin.label());
        for category in model.categories() {
            assert!(model.template(category).is_some());
        }
    }
}

#[test]
fn movie_quiz_exposes_catalog_keys_and_pools() {
    let model = ScoringModel::builtin(BuiltinModel::MovieQuiz).expect("builtin");
    let drama = Category::new("드라마");

    assert_eq!(model.catalog_key(&drama), Some("18"));
    assert!(!model.pool(&drama).is_empty());
    assert!(model.pool(&Category::new("다큐")).is_empty());
    assert_eq!(model.catalog().len(), 4);
}

#[test]
fn empty_universe_is_rejected() {
    let mut document = tiny_document();
    document.categories.clear();

    let err = ScoringModel::from_document(document).expect_err("no categories");
    assert!(matches!(err, ModelError::EmptyUniverse));
}

#[test]
fn duplicate_category_is_rejected() {
    let mut document = tiny_document();
    document.categories.push(Category::new("코미디"));

    let err = ScoringModel::from_document(document).expect_err("duplicate category");
    assert!(matches!(err, ModelError::DuplicateCategory(c) if c.as_str() == "코미디"));
}

#[test]
fn negative_threshold_is_rejected() {
    let mut document = tiny_document();
    document.blend_threshold = -0.1;

    let err = ScoringModel::from_document(document).expect_err("negative threshold");
    assert!(matches!(err, ModelError::InvalidThreshold(_)));
}

#[test]
fn table_category_outside_universe_is_rejected() {
    let mut document = tiny_document();
    document.weights.set("비", "다큐", 0.3);

    let err = ScoringModel::from_document(document).expect_err("unknown table category");
    assert!(matches!(
        err,
        ModelError::UnknownTableCategory { ref choice, .. } if choice == "비"
    ));
}

#[test]
fn catalog_choice_without_table_entry_is_rejected() {
    let mut document = tiny_document();
    document.questions[0].choices.push("안개".to_string());

    let err = ScoringModel::from_document(document).expect_err("missing table entry");
    assert!(matches!(
        err,
        ModelError::MissingTableEntry { ref choice, .. } if choice == "안개"
    ));
}

#[test]
fn category_without_contribution_is_rejected() {
    let mut document = tiny_document();
    document.categories.push(Category::new("스릴러"));
    document
        .templates
        .insert(Category::new("스릴러"), "긴장".to_string());

    let err = ScoringModel::from_document(document).expect_err("unreachable category");
    assert!(matches!(err, ModelError::UnreachableCategory(c) if c.as_str() == "스릴러"));
}

#[test]
fn category_without_template_is_rejected() {
    let mut document = tiny_document();
    document.templates.remove(&Category::new("액션"));

    let err = ScoringModel::from_document(document).expect_err("missing template");
    assert!(matches!(err, ModelError::MissingTemplate(c) if c.as_str() == "액션"));
}

#[test]
fn negative_weight_is_rejected() {
    let mut document = tiny_document();
    document.weights.set("해", "액션", -1.0);

    let err = ScoringModel::from_document(document).expect_err("negative weight");
    assert!(matches!(err, ModelError::InvalidWeight { .. }));
}

#[test]
fn pool_for_unknown_category_is_rejected() {
    let mut document = tiny_document();
    document
        .pools
        .insert(Category::new("다큐"), vec!["나의 문어 선생님".to_string()]);

    let err = ScoringModel::from_document(document).expect_err("unknown pool category");
    assert!(matches!(err, ModelError::UnknownCategory { section: "pools", .. }));
}

#[test]
fn replacement_table_is_validated_against_catalog() {
    let model = ScoringModel::from_document(tiny_document()).expect("tiny model valid");
    let partial = ScoreTable::new()
        .with("비", "드라마", 1.0)
        .with("해", "코미디", 1.0);

    let err = model.with_score_table(partial).expect_err("눈 has no entry");
    assert!(matches!(err, ModelError::MissingTableEntry { .. }));
}

#[test]
fn csv_row_without_weight_is_rejected() {
    let csv = "choice,category,weight\n비,드라마,\n";
    let err = ScoreTable::from_csv_reader(std::io::Cursor::new(csv)).expect_err("missing weight");
    assert!(matches!(err, ModelError::MissingWeight { .. }));
}

#[test]
fn json_document_round_trips_through_model() {
    let raw = serde_json::to_string(&tiny_document()).expect("serializes");
    let model = ScoringModel::from_json_str(&raw).expect("parses");

    assert_eq!(model.name(), "tiny");
    assert_eq!(model.into_document(), tiny_document());
}

#[test]
fn malformed_json_reports_parse_error() {
    let err = ScoringModel::from_json_str("{ \"name\": ").expect_err("truncated");
    assert!(matches!(err, ModelError::Parse(_)));
}
