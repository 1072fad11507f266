use std::collections::BTreeMap;

use super::domain::{Category, Ranking};

/// Joins the template fragments of the primary categories into a one-line rationale.
pub fn explain(ranking: &Ranking, templates: &BTreeMap<Category, String>) -> String {
    let fragment = |category: &Category| {
        templates
            .get(category)
            .cloned()
            .unwrap_or_else(|| category.to_string())
    };

    match (ranking.top(), ranking.secondary()) {
        (Some(top), Some(second)) => format!(
            "{top} + {second} 믹스 취향 · {} / {}",
            fragment(top),
            fragment(second)
        ),
        (Some(top), None) => format!("{top} 취향 · {}", fragment(top)),
        (None, _) => String::new(),
    }
}
