use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use weaver_core::preference::{AnswerSet, BuiltinModel, PreferenceEngine};
use weaver_core::sampling::{
    daily_seed, sample, DailyPicker, HistoryPolicy, HistoryStore, JsonFileHistoryStore,
};

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).expect("valid start date")
}

fn file_picker(dir: &tempfile::TempDir) -> (DailyPicker, Arc<JsonFileHistoryStore>) {
    file_picker_at(dir, start)
}

fn file_picker_at(
    dir: &tempfile::TempDir,
    today: fn() -> NaiveDate,
) -> (DailyPicker, Arc<JsonFileHistoryStore>) {
    let store = Arc::new(JsonFileHistoryStore::new(dir.path().join("history.json")));
    let picker = DailyPicker::new(store.clone(), HistoryPolicy::default()).with_clock(today);
    (picker, store)
}

#[test]
fn drama_answers_produce_a_drama_title_of_the_day() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (picker, _) = file_picker(&dir);
    let engine = PreferenceEngine::builtin(BuiltinModel::MovieQuiz).expect("builtin");

    let recommendation = engine.evaluate(
        &AnswerSet::new()
            .select("q1", "집에서 휴식")
            .select("q2", "혼자 있기"),
    );
    assert_eq!(recommendation.rationale, "드라마 취향 · 잔잔하게 감정을 따라가는 이야기");

    let picks = engine.daily_picks(&recommendation.ranking, start(), &picker);
    assert_eq!(picks.len(), 1);
    assert_eq!(picks[0].key, "movie_quiz:드라마");
    assert!(engine
        .model()
        .pool(&recommendation.ranking.primary[0])
        .contains(&picks[0].item));
}

#[test]
fn history_survives_restarts_and_blocks_repeats() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool: Vec<String> = (1..=20).map(|n| format!("노래 {n}")).collect();

    let first = {
        let (picker, _) = file_picker(&dir);
        picker.pick("song", start(), &pool).expect("pick")
    };

    let (picker, store) = file_picker(&dir);
    let again = picker.pick("song", start(), &pool).expect("pick");
    assert_eq!(first, again, "same-day pick is stable across picker instances");

    let mut seen = vec![first.item];
    for offset in 1..14 {
        let pick = picker
            .pick("song", start() + Duration::days(offset), &pool)
            .expect("pick");
        assert!(!seen.contains(&pick.item));
        assert!(!pick.fallback);
        seen.push(pick.item);
    }

    let history = store.load().expect("history persisted");
    assert_eq!(history.len(), 14);
}

#[test]
fn unrecorded_pick_matches_plain_seeded_sample() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (picker, _) = file_picker(&dir);
    let pool = vec!["a".to_string(), "b".to_string(), "c".to_string()];

    let pick = picker.pick("letters", start(), &pool).expect("pick");
    let expected = sample(&daily_seed(start(), "letters"), &pool).expect("sample");

    assert_eq!(&pick.item, expected);
}

#[test]
fn old_history_is_pruned_on_write() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (picker, store) = file_picker_at(&dir, || start() + Duration::days(61));
    let pool = vec!["x".to_string(), "y".to_string()];

    picker.pick("k", start(), &pool).expect("pick");
    picker
        .pick("k", start() + Duration::days(61), &pool)
        .expect("pick");

    let history = store.load().expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history.records()[0].date, start() + Duration::days(61));
}
