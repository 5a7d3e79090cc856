//! Axum route handlers for the Interview API.
//!
//! Start and answer hold the session lock until they return, so they run one at a
//! time, AI calls included. Status never waits for it.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::service::{start_interview, submit_answer, StartedInterview, TurnOutcome};
use crate::interview::session::SessionSnapshot;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StartRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: Option<String>,
    /// Optional guard against answering into an interview started by someone else.
    pub session_id: Option<Uuid>,
}

/// Body of GET /interview/status. While a start or answer call holds the session,
/// `busy` is set and the snapshot fields are omitted.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub busy: bool,
    #[serde(flatten)]
    pub session: Option<SessionSnapshot>,
}

/// POST /interview/start
pub async fn handle_start(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<StartedInterview>, AppError> {
    let topic = request.topic.unwrap_or_default();
    let mut session = state.session.lock().await;
    let started = start_interview(&mut session, state.llm.as_ref(), &topic).await?;
    Ok(Json(started))
}

/// POST /interview/answer
pub async fn handle_answer(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<TurnOutcome>, AppError> {
    let mut session = state.session.lock().await;
    let outcome = submit_answer(
        &mut session,
        state.llm.as_ref(),
        request.answer,
        request.session_id,
    )
    .await?;
    Ok(Json(outcome))
}

/// GET /interview/status
pub async fn handle_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let response = match state.session.try_lock() {
        Ok(session) => StatusResponse {
            busy: false,
            session: Some(session.snapshot()),
        },
        Err(_) => StatusResponse {
            busy: true,
            session: None,
        },
    };
    Json(response)
}
