use tracing::debug;

use super::domain::{AnswerSet, CategoryScoreVector};
use super::model::ScoringModel;
use super::ScoreContribution;

pub(crate) fn score_answers(
    answers: &AnswerSet,
    model: &ScoringModel,
) -> (CategoryScoreVector, Vec<ScoreContribution>) {
    let mut vector = CategoryScoreVector::zeroed(model.categories());
    let mut contributions = Vec::new();

    for (question_id, answer) in answers.iter() {
        match model.catalog().get(question_id) {
            Some(question) if !question.multiple && answer.choices().len() > 1 => {
                debug!(
                    question = %question_id,
                    selected = answer.choices().len(),
                    "single-select question answered with several choices; summing all"
                );
            }
            Some(_) => {}
            None => {
                debug!(question = %question_id, "answer for unknown question scored by choice only");
            }
        }

        for choice in answer.choices() {
            let Some(weights) = model.table().contributions(choice) else {
                debug!(question = %question_id, %choice, "unknown choice contributes nothing");
                continue;
            };

            for (category, weight) in weights {
                vector.add(category, *weight);
                contributions.push(ScoreContribution {
                    question: question_id.clone(),
                    choice: choice.clone(),
                    category: category.clone(),
                    weight: *weight,
                });
            }
        }
    }

    (vector, contributions)
}
