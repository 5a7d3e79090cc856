//! Interview session manager — advances the session one turn at a time.
//!
//! Flow per answer: record answer → rebuild conversation log → turn evaluation call →
//! parse reply → score → either queue the next question or run the final evaluation.
//!
//! Callers must hold the session lock for the whole operation, including the AI calls.

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::prompts::{
    build_final_evaluation_prompt, build_opening_question_prompt, build_turn_evaluation_prompt,
};
use crate::interview::protocol::{FinalEvaluation, TurnReply};
use crate::interview::scoring::score_delta;
use crate::interview::session::{Session, MAX_QUESTIONS};
use crate::llm_client::{LanguageModel, Turn};

// ────────────────────────────────────────────────────────────────────────────
// Results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct StartedInterview {
    pub session_id: Uuid,
    pub question: String,
    pub question_number: usize,
    pub total_questions: usize,
    pub topic: String,
}

/// Result of one answered question. `question_number` is the question just answered.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TurnOutcome {
    Continue {
        feedback: String,
        question_number: usize,
        total_questions: usize,
        score_hint: String,
        next_question: String,
    },
    Finished {
        feedback: String,
        question_number: usize,
        total_questions: usize,
        score_hint: String,
        final_summary: String,
        final_score: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Operations
// ────────────────────────────────────────────────────────────────────────────

/// Replaces `session` with a fresh interview on `topic` and asks for the first question.
pub async fn start_interview(
    session: &mut Session,
    llm: &dyn LanguageModel,
    topic: &str,
) -> Result<StartedInterview, AppError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation(
            "An interview topic is required.".to_string(),
        ));
    }

    *session = Session::start(topic);
    info!("Starting interview {} on topic {topic:?}", session.id);

    let prompt = build_opening_question_prompt(topic);
    let question = match llm.send_turn(&prompt, &[]).await {
        Ok(question) => question,
        Err(e) => {
            session.active = false;
            warn!("Opening question failed for interview {}: {e}", session.id);
            return Err(e.into());
        }
    };

    session.questions.push(question.clone());

    Ok(StartedInterview {
        session_id: session.id,
        question,
        question_number: 1,
        total_questions: MAX_QUESTIONS,
        topic: topic.to_string(),
    })
}

/// Records `answer` for the pending question and advances the interview.
///
/// A missing answer is treated as an empty one. `session_id`, when given, must
/// name the current interview.
pub async fn submit_answer(
    session: &mut Session,
    llm: &dyn LanguageModel,
    answer: Option<String>,
    session_id: Option<Uuid>,
) -> Result<TurnOutcome, AppError> {
    if !session.active {
        return Err(AppError::SessionNotActive);
    }
    if session_id.is_some_and(|id| id != session.id) {
        return Err(AppError::SessionNotActive);
    }

    let index = session.current_index;
    let question = session
        .pending_question()
        .ok_or_else(|| {
            AppError::InconsistentState(format!(
                "no pending question at index {index} ({} questions)",
                session.questions.len()
            ))
        })?
        .to_string();
    if session.answers.len() != index || session.feedback.len() != index {
        return Err(AppError::InconsistentState(format!(
            "{} answers and {} feedback entries at index {index}",
            session.answers.len(),
            session.feedback.len()
        )));
    }

    let answer = answer.unwrap_or_default();
    session.answers.push(answer.clone());
    info!("Processing answer for Q{} of interview {}", index + 1, session.id);

    let history = session.conversation_log();
    let prompt =
        build_turn_evaluation_prompt(session.topic(), &question, &answer, index, MAX_QUESTIONS);

    let reply_text = match llm.send_turn(&prompt, &history).await {
        Ok(text) => text,
        Err(e) => {
            session.answers.pop();
            session.active = false;
            warn!("Turn evaluation failed for interview {}: {e}", session.id);
            return Err(e.into());
        }
    };

    let reply = TurnReply::parse(&reply_text);
    if reply.degraded {
        warn!(
            "Unparseable turn reply for interview {}; ending interview",
            session.id
        );
    }

    session.feedback.push(reply.feedback.clone());
    session.score += score_delta(&reply.score_hint, &answer);
    session.current_index += 1;

    let finished = session.current_index >= MAX_QUESTIONS || reply.ends_interview();
    if !finished {
        session.questions.push(reply.next_question.clone());
        return Ok(TurnOutcome::Continue {
            feedback: reply.feedback,
            question_number: index + 1,
            total_questions: MAX_QUESTIONS,
            score_hint: reply.score_hint,
            next_question: reply.next_question,
        });
    }

    let evaluation = final_evaluation(session, llm, &history).await;
    session.active = false;
    info!(
        "Interview {} finished after {} questions (score {}, final {:?})",
        session.id, session.current_index, session.score, evaluation.final_score
    );

    Ok(TurnOutcome::Finished {
        feedback: reply.feedback,
        question_number: index + 1,
        total_questions: MAX_QUESTIONS,
        score_hint: reply.score_hint,
        final_summary: evaluation.summary,
        final_score: evaluation.final_score,
    })
}

/// The final evaluation never fails the turn: call or parse failures fall back
/// to the accumulated score.
async fn final_evaluation(
    session: &Session,
    llm: &dyn LanguageModel,
    history: &[Turn],
) -> FinalEvaluation {
    let prompt = build_final_evaluation_prompt(session.topic());
    match llm.send_turn(&prompt, history).await {
        Ok(text) => {
            let evaluation = FinalEvaluation::parse(&text, session.score);
            if evaluation.degraded {
                warn!("Unparseable final evaluation for interview {}", session.id);
            }
            evaluation
        }
        Err(e) => {
            warn!("Final evaluation failed for interview {}: {e}", session.id);
            FinalEvaluation::unavailable(session.score)
        }
    }
}
