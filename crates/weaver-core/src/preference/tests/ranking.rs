use super::common::categories;
use crate::preference::{rank, CategoryScoreVector};

#[test]
fn gap_equal_to_threshold_blends() {
    let vector = CategoryScoreVector::from_scores([("드라마", 10.0), ("코미디", 9.2)]);
    let ranking = rank(&vector, &categories(&["드라마", "코미디"]), 0.8);

    assert!(ranking.blended);
    assert_eq!(ranking.primary, categories(&["드라마", "코미디"]));
    assert_eq!(ranking.secondary().map(|c| c.as_str()), Some("코미디"));
}

#[test]
fn gap_above_threshold_keeps_single_top() {
    let vector = CategoryScoreVector::from_scores([("드라마", 10.0), ("코미디", 9.1)]);
    let ranking = rank(&vector, &categories(&["드라마", "코미디"]), 0.8);

    assert!(!ranking.blended);
    assert_eq!(ranking.primary, categories(&["드라마"]));
    assert!(ranking.secondary().is_none());
}

#[test]
fn zero_second_score_never_blends() {
    let vector = CategoryScoreVector::from_scores([("드라마", 0.5), ("코미디", 0.0)]);
    let ranking = rank(&vector, &categories(&["드라마", "코미디"]), 0.8);

    assert!(!ranking.blended);
}

#[test]
fn ties_follow_priority_not_input_order() {
    let priority = categories(&["액션", "드라마", "코미디"]);
    let forward = CategoryScoreVector::from_scores([("드라마", 1.0), ("액션", 1.0), ("코미디", 0.2)]);
    let reversed = CategoryScoreVector::from_scores([("코미디", 0.2), ("액션", 1.0), ("드라마", 1.0)]);

    let a = rank(&forward, &priority, 0.0);
    let b = rank(&reversed, &priority, 0.0);

    assert_eq!(a.primary, categories(&["액션", "드라마"]));
    assert_eq!(a, b);
}

#[test]
fn categories_outside_priority_sort_last_then_lexically() {
    let vector = CategoryScoreVector::from_scores([("나", 1.0), ("가", 1.0), ("드라마", 1.0)]);
    let ranking = rank(&vector, &categories(&["드라마"]), 0.0);

    let order: Vec<&str> = ranking.ordered.iter().map(|s| s.category.as_str()).collect();
    assert_eq!(order, vec!["드라마", "가", "나"]);
}

#[test]
fn all_zero_vector_picks_first_priority_alone() {
    let priority = categories(&["드라마", "코미디", "액션"]);
    let vector = CategoryScoreVector::from_scores([("액션", 0.0), ("코미디", 0.0), ("드라마", 0.0)]);
    let ranking = rank(&vector, &priority, 0.8);

    assert_eq!(ranking.primary, categories(&["드라마"]));
    assert!(!ranking.blended);
    assert_eq!(ranking.ordered.len(), 3);
}

#[test]
fn empty_vector_has_no_top() {
    let ranking = rank(&CategoryScoreVector::default(), &categories(&["드라마"]), 0.8);

    assert!(ranking.top().is_none());
    assert!(ranking.primary.is_empty());
}

#[test]
fn score_lookup_reads_ordered_entries() {
    let vector = CategoryScoreVector::from_scores([("드라마", 1.5), ("코미디", 0.25)]);
    let ranking = rank(&vector, &categories(&["드라마", "코미디"]), 0.1);

    assert_eq!(ranking.score_of("코미디"), 0.25);
    assert_eq!(ranking.score_of("액션"), 0.0);
}
