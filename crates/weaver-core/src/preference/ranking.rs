use std::cmp::Ordering;

use super::domain::{Category, CategoryScore, CategoryScoreVector, Ranking};

/// Absorbs float residue so a gap of exactly the threshold (e.g. 10.0 - 9.2) still blends.
pub const BLEND_TOLERANCE: f64 = 1e-9;

/// Sorts categories by descending score and decides whether the top two blend.
///
/// Equal scores fall back to `priority`; categories missing from it sort after every
/// prioritized one, lexically. With an all-zero vector the first priority category wins alone.
pub fn rank(vector: &CategoryScoreVector, priority: &[Category], blend_threshold: f64) -> Ranking {
    let priority_of = |category: &Category| {
        priority
            .iter()
            .position(|candidate| candidate == category)
            .unwrap_or(usize::MAX)
    };

    let mut ordered: Vec<CategoryScore> = vector.iter().cloned().collect();
    ordered.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| priority_of(&a.category).cmp(&priority_of(&b.category)))
            .then_with(|| a.category.cmp(&b.category))
    });

    let blended = match (ordered.first(), ordered.get(1)) {
        (Some(first), Some(second)) => {
            second.score > 0.0 && first.score - second.score <= blend_threshold + BLEND_TOLERANCE
        }
        _ => false,
    };

    let primary_len = if blended { 2 } else { 1 };
    let primary = ordered
        .iter()
        .take(primary_len)
        .map(|entry| entry.category.clone())
        .collect();

    Ranking {
        primary,
        ordered,
        blended,
    }
}
