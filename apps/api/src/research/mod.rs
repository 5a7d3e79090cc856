//! Research reports — one stateless model call per request.

pub mod handlers;
pub mod prompts;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::LanguageModel;
use crate::research::prompts::build_research_prompt;

/// Asks the model for a Markdown report on `topic` and returns its text unchanged.
pub async fn generate_report(topic: &str, llm: &dyn LanguageModel) -> Result<String, AppError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(AppError::Validation(
            "A research topic is required.".to_string(),
        ));
    }

    info!("Generating research report on {topic:?}");
    let report = llm.send_turn(&build_research_prompt(topic), &[]).await?;
    Ok(report)
}
