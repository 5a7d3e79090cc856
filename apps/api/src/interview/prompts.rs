// All LLM prompt templates for the interview module.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::interview::protocol::{
    marker, END_INTERVIEW, FEEDBACK_KEY, FINAL_SCORE_KEY, NEXT_QUESTION_KEY, SCORE_HINT_KEY,
    SUMMARY_KEY,
};
use crate::llm_client::prompts::{EMPHASIS_INSTRUCTION, NO_PREAMBLE_INSTRUCTION};

/// Opening question prompt. Replace: {topic}, {emphasis}, {no_preamble}
pub const OPENING_QUESTION_TEMPLATE: &str = r#"You are an expert technical interviewer for software developers. Write the first interview question on the topic "{topic}".
The question must be clear, concise, and pitched at an intermediate level. {emphasis}
Return exactly one question. {no_preamble}"#;

/// Turn evaluation prompt.
/// Replace: {answer}, {question}, {number}, {next_number}, {total}, {topic}, {emphasis},
///          {feedback_marker}, {next_marker}, {hint_marker}, {end}
pub const TURN_EVALUATION_TEMPLATE: &str = r#"You are an expert technical interviewer. Using the interview history and the candidate's latest answer ("{answer}") to the question ("{question}"):
1. Evaluate the answer: give brief feedback (about 2-3 lines) on its strengths, what could be improved, or how well it fits. {emphasis}
2. Prepare the next question: this was question {number} of {total}. If fewer than {total} questions have been asked, write question {next_number} on the topic "{topic}", building on the last answer or covering another aspect of the topic. {emphasis}
3. Format your reply exactly like this, keeping the delimiters:
{feedback_marker}
[Your feedback on the answer]
{next_marker}
[The next question, or exactly "{end}" if {total} questions have been asked]
{hint_marker}
[A 1-2 word hint in English rating this answer, e.g. "Good", "OK", "Needs Improvement". No explanation.]"#;

/// Final evaluation prompt.
/// Replace: {topic}, {summary_marker}, {score_marker}
pub const FINAL_EVALUATION_TEMPLATE: &str = r#"You are an expert evaluator of interview results. Based on the topic "{topic}" and the entire interview history in this conversation, provide:
1. A brief overall assessment (about 3-5 lines) of the candidate's performance across the whole interview. Use **bold formatting** for the key points.
2. A final score. Any scale is fine (e.g. X/100, A-F, Pass/Fail) as long as it is a clear number or grade.
3. Format the result exactly like this:
{summary_marker}
[Overall assessment]
{score_marker}
[Final score only, e.g. 75/100, B+, Pass]"#;

pub fn build_opening_question_prompt(topic: &str) -> String {
    OPENING_QUESTION_TEMPLATE
        .replace("{topic}", topic)
        .replace("{emphasis}", EMPHASIS_INSTRUCTION)
        .replace("{no_preamble}", NO_PREAMBLE_INSTRUCTION)
}

/// `index` is the zero-based index of the question just answered.
pub fn build_turn_evaluation_prompt(
    topic: &str,
    question: &str,
    answer: &str,
    index: usize,
    total: usize,
) -> String {
    TURN_EVALUATION_TEMPLATE
        .replace("{feedback_marker}", &marker(FEEDBACK_KEY))
        .replace("{next_marker}", &marker(NEXT_QUESTION_KEY))
        .replace("{hint_marker}", &marker(SCORE_HINT_KEY))
        .replace("{end}", END_INTERVIEW)
        .replace("{emphasis}", EMPHASIS_INSTRUCTION)
        .replace("{number}", &(index + 1).to_string())
        .replace("{next_number}", &(index + 2).to_string())
        .replace("{total}", &total.to_string())
        .replace("{topic}", topic)
        .replace("{question}", question)
        .replace("{answer}", answer)
}

pub fn build_final_evaluation_prompt(topic: &str) -> String {
    FINAL_EVALUATION_TEMPLATE
        .replace("{summary_marker}", &marker(SUMMARY_KEY))
        .replace("{score_marker}", &marker(FINAL_SCORE_KEY))
        .replace("{topic}", topic)
}
