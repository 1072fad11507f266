use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::digest::Period;
use super::domain::{EntrySubmission, ProfileDraft};
use super::repository::JournalRepository;
use super::service::{JournalError, JournalService};
use crate::error::AppError;

/// Router builder exposing the journal flow over HTTP.
pub fn journal_router<R>(service: Arc<JournalService<R>>) -> Router
where
    R: JournalRepository + 'static,
{
    Router::new()
        .route("/api/v1/journal/prompt", get(prompt_handler::<R>))
        .route(
            "/api/v1/journal/entries",
            get(list_handler::<R>).post(submit_handler::<R>),
        )
        .route("/api/v1/journal/digest", get(digest_handler::<R>))
        .route(
            "/api/v1/journal/profile",
            get(profile_handler::<R>).put(register_handler::<R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromptQuery {
    #[serde(default)]
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DigestQuery {
    #[serde(default)]
    period: Option<String>,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": message }))).into_response()
}

fn error_response(error: JournalError) -> Response {
    AppError::from(error).into_response()
}

pub(crate) async fn prompt_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    Query(query): Query<PromptQuery>,
) -> Response
where
    R: JournalRepository + 'static,
{
    let date = match query.date.as_deref().map(str::trim) {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(err) => {
                return bad_request(format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
            }
        },
        None => Local::now().date_naive(),
    };

    match service.question_of_the_day(date) {
        Some(pick) => (StatusCode::OK, axum::Json(pick)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "no special questions configured" })),
        )
            .into_response(),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    axum::Json(submission): axum::Json<EntrySubmission>,
) -> Response
where
    R: JournalRepository + 'static,
{
    match service.submit(submission, Local::now().naive_local()) {
        Ok(entry) => (StatusCode::CREATED, axum::Json(entry)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R>(State(service): State<Arc<JournalService<R>>>) -> Response
where
    R: JournalRepository + 'static,
{
    match service.entries() {
        Ok(entries) => (StatusCode::OK, axum::Json(entries)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn digest_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    Query(query): Query<DigestQuery>,
) -> Response
where
    R: JournalRepository + 'static,
{
    let result = match query.period.as_deref() {
        Some(raw) => match Period::parse(raw) {
            Some(period) => service
                .digest(period)
                .map(|digest| digest.into_iter().collect::<Vec<_>>()),
            None => return bad_request(format!("unknown period '{raw}'")),
        },
        None => service.digests(),
    };

    match result {
        Ok(digests) => (StatusCode::OK, axum::Json(digests)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn profile_handler<R>(State(service): State<Arc<JournalService<R>>>) -> Response
where
    R: JournalRepository + 'static,
{
    match service.profile() {
        Ok(Some(profile)) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "error": "profile not registered" })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<JournalService<R>>>,
    axum::Json(draft): axum::Json<ProfileDraft>,
) -> Response
where
    R: JournalRepository + 'static,
{
    match service.register(draft, Local::now().date_naive()) {
        Ok(profile) => (StatusCode::OK, axum::Json(profile)).into_response(),
        Err(err) => error_response(err),
    }
}
