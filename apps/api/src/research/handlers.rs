use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::research::generate_report;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    pub report: String,
}

/// POST /research
///
/// Stateless: never touches the interview session.
pub async fn handle_research(
    State(state): State<AppState>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, AppError> {
    let topic = request.topic.unwrap_or_default();
    let report = generate_report(&topic, state.llm.as_ref()).await?;
    Ok(Json(ResearchResponse { report }))
}
