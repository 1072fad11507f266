use crate::infra::{deserialize_optional_date, AppState, QuizState};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use weaver_core::journal::{journal_router, JournalRepository, JournalService};
use weaver_core::preference::{AnswerSet, Question, Recommendation};
use weaver_core::sampling::DailyPick;

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    pub(crate) answers: AnswerSet,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) date: Option<NaiveDate>,
    /// Also hand out one pooled title per primary category for the date.
    #[serde(default)]
    pub(crate) pick: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct RecommendationResponse {
    #[serde(flatten)]
    pub(crate) recommendation: Recommendation,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) picks: Vec<DailyPick>,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuestionsResponse {
    pub(crate) model: String,
    pub(crate) questions: Vec<Question>,
}

pub(crate) fn with_service_routes<R>(quiz: QuizState, journal: Arc<JournalService<R>>) -> Router
where
    R: JournalRepository + 'static,
{
    let quiz_routes = Router::new()
        .route("/api/v1/quiz/questions", get(questions_endpoint))
        .route("/api/v1/quiz/recommendation", post(recommendation_endpoint))
        .with_state(quiz);

    journal_router(journal)
        .merge(quiz_routes)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint(State(quiz): State<QuizState>) -> Json<QuestionsResponse> {
    let model = quiz.engine.model();
    Json(QuestionsResponse {
        model: model.name().to_string(),
        questions: model.catalog().questions().to_vec(),
    })
}

pub(crate) async fn recommendation_endpoint(
    State(quiz): State<QuizState>,
    Json(payload): Json<RecommendationRequest>,
) -> Json<RecommendationResponse> {
    let RecommendationRequest {
        answers,
        date,
        pick,
    } = payload;

    let recommendation = quiz.engine.evaluate(&answers);
    let picks = if pick {
        let date = date.unwrap_or_else(|| Local::now().date_naive());
        quiz.engine
            .daily_picks(&recommendation.ranking, date, &quiz.picker)
    } else {
        Vec::new()
    };

    Json(RecommendationResponse {
        recommendation,
        picks,
    })
}
