//! Interview session — the single process-wide interview and its conversation log.
//!
//! Invariants between turns:
//! - `answers.len() == feedback.len() == current_index`
//! - `questions.len() == current_index + 1` while a question is pending,
//!   `== current_index` once finished
//! - `current_index <= MAX_QUESTIONS`

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::llm_client::Turn;

/// Number of questions after which an interview always ends.
pub const MAX_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub id: Uuid,
    pub active: bool,
    pub topic: Option<String>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
    pub feedback: Vec<String>,
    pub current_index: usize,
    pub score: u32,
    pub started_at: Option<DateTime<Utc>>,
}

/// Read-only view of the session served by `GET /interview/status`.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Option<Uuid>,
    pub active: bool,
    pub topic: Option<String>,
    pub answered: usize,
    pub total_questions: usize,
    pub score: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh active session for `topic`. Nothing carries over from a previous interview.
    pub fn start(topic: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            active: true,
            topic: Some(topic.into()),
            started_at: Some(Utc::now()),
            ..Self::default()
        }
    }

    /// The question awaiting an answer, if the index is valid.
    pub fn pending_question(&self) -> Option<&str> {
        self.questions.get(self.current_index).map(String::as_str)
    }

    pub fn topic(&self) -> &str {
        self.topic.as_deref().unwrap_or_default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.started_at.map(|_| self.id),
            active: self.active,
            topic: self.topic.clone(),
            answered: self.current_index,
            total_questions: MAX_QUESTIONS,
            score: self.score,
            started_at: self.started_at,
        }
    }

    /// Conversation log for the turn currently being answered.
    /// Expects the current answer to be already recorded at `answers[current_index]`.
    pub fn conversation_log(&self) -> Vec<Turn> {
        build_history(
            &self.questions,
            &self.answers,
            &self.feedback,
            self.current_index,
        )
    }
}

/// Rebuilds the transcript the stateless model needs on every call.
///
/// For each answered index `i`: the question, the answer, then a combined
/// feedback + next-question turn when both exist. The pending question and its
/// answer close the log.
pub fn build_history(
    questions: &[String],
    answers: &[String],
    feedback: &[String],
    current_index: usize,
) -> Vec<Turn> {
    let mut history = Vec::with_capacity(current_index * 3 + 2);

    for i in 0..current_index {
        if let Some(question) = questions.get(i) {
            history.push(Turn::model(format!("Question {}: {}", i + 1, question)));
        }
        if let Some(answer) = answers.get(i) {
            history.push(Turn::user(answer.clone()));
        }
        if let (Some(fb), Some(next)) = (feedback.get(i), questions.get(i + 1)) {
            history.push(Turn::model(format!(
                "Feedback: {}\nQuestion {}: {}",
                fb,
                i + 2,
                next
            )));
        }
    }

    if let Some(question) = questions.get(current_index) {
        history.push(Turn::model(format!(
            "Question {}: {}",
            current_index + 1,
            question
        )));
    }
    if let Some(answer) = answers.get(current_index) {
        history.push(Turn::user(answer.clone()));
    }

    history
}
