// src/api/routes.rs

use super::{
    SharedState,
    auth::AuthUser,
    error::{ApiError, ApiResult},
};
use crate::{
    models::{Flashcard, LogEntry, LogLevel, StatisticsReport, StudySession, User},
    services::{
        flashcards, logs,
        practice::{self, AnswerOutcome, SessionSummary},
        statistics, users,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
};
use serde::Deserialize;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/users", post(register))
        .route("/api/flashcards", get(list_flashcards).post(create_flashcard))
        .route("/api/flashcards/trashed", get(list_trashed))
        .route(
            "/api/flashcards/{id}",
            get(show_flashcard).put(update_flashcard).delete(trash_flashcard),
        )
        .route("/api/flashcards/{id}/restore", post(restore_flashcard))
        .route("/api/flashcards/{id}/force", delete(purge_flashcard))
        .route("/api/study-sessions", post(start_session))
        .route("/api/study-sessions/{id}/end", post(end_session))
        .route("/api/study-sessions/{id}/results", post(record_answer))
        .route("/api/statistics", get(show_statistics))
        .route("/api/logs", get(recent_logs))
        .with_state(state)
}

// --- Request bodies ---

#[derive(Deserialize, Debug)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct CreateFlashcardRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Deserialize, Debug)]
pub struct UpdateFlashcardRequest {
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AnswerRequest {
    pub flashcard_id: i64,
    pub answer: String,
}

#[derive(Deserialize, Debug)]
pub struct LogsQuery {
    pub limit: Option<usize>,
    pub level: Option<String>,
}

// --- Users ---

async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let mut db = state.db()?;
    let user = users::register(&mut db, &req.name, &req.email, &req.password)?;
    Ok((StatusCode::CREATED, Json(user)))
}

// --- Flashcards ---

async fn list_flashcards(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<Flashcard>>> {
    let db = state.db()?;
    Ok(Json(flashcards::list(&db, &user)?))
}

async fn list_trashed(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<Flashcard>>> {
    let db = state.db()?;
    Ok(Json(flashcards::list_trashed(&db, &user)?))
}

async fn create_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Json(req): Json<CreateFlashcardRequest>,
) -> ApiResult<(StatusCode, Json<Flashcard>)> {
    let mut db = state.db()?;
    let card = flashcards::create(&mut db, &state.rules, &user, &req.question, &req.answer)?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn show_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Flashcard>> {
    let db = state.db()?;
    Ok(Json(flashcards::get(&db, &user, id)?))
}

async fn update_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateFlashcardRequest>,
) -> ApiResult<Json<Flashcard>> {
    let mut db = state.db()?;
    let card = flashcards::update(
        &mut db,
        &state.rules,
        &user,
        id,
        req.question.as_deref(),
        req.answer.as_deref(),
    )?;
    Ok(Json(card))
}

async fn trash_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Flashcard>> {
    let mut db = state.db()?;
    Ok(Json(flashcards::delete(&mut db, &user, id)?))
}

async fn restore_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<Flashcard>> {
    let mut db = state.db()?;
    Ok(Json(flashcards::restore(&mut db, &user, id)?))
}

async fn purge_flashcard(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let mut db = state.db()?;
    flashcards::force_delete(&mut db, &user, id)?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Practice ---

async fn start_session(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
) -> ApiResult<(StatusCode, Json<StudySession>)> {
    let mut db = state.db()?;
    let session = practice::start_session(&mut db, &user)?;
    Ok((StatusCode::CREATED, Json(session)))
}

async fn end_session(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SessionSummary>> {
    let mut db = state.db()?;
    Ok(Json(practice::end_session(&mut db, &user, id)?))
}

async fn record_answer(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<AnswerRequest>,
) -> ApiResult<(StatusCode, Json<AnswerOutcome>)> {
    let mut db = state.db()?;
    let outcome = practice::answer(&mut db, &user, id, req.flashcard_id, &req.answer)?;
    Ok((StatusCode::CREATED, Json(outcome)))
}

// --- Statistics & logs ---

async fn show_statistics(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<StatisticsReport>> {
    let db = state.db()?;
    Ok(Json(statistics::report(&db, &user)?))
}

async fn recent_logs(
    State(state): State<SharedState>,
    AuthUser(user): AuthUser,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let level = query
        .level
        .as_deref()
        .map(str::parse::<LogLevel>)
        .transpose()
        .map_err(ApiError::BadRequest)?;
    let limit = query.limit.unwrap_or(state.default_log_limit);

    let db = state.db()?;
    Ok(Json(logs::recent(&db, &user, limit, level)?))
}
