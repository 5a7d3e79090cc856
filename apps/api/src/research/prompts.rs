// LLM prompt templates for the research module.

use crate::llm_client::prompts::NO_PREAMBLE_INSTRUCTION;

/// Research report prompt. Replace: {topic}, {no_preamble}
pub const RESEARCH_PROMPT_TEMPLATE: &str = r#"You are a professional researcher. Compile the information you know into a detailed report (about 300-500 words) on the topic "{topic}".
The report should cover the key points, applications (if any), and related challenges or trends.
Present it clearly and with structure, using Markdown such as **bold**, *italics*, bulleted lists (-), and code blocks (```) for technical examples where useful.
{no_preamble} Do not open with a phrase like "Here is your report"."#;

pub fn build_research_prompt(topic: &str) -> String {
    RESEARCH_PROMPT_TEMPLATE
        .replace("{no_preamble}", NO_PREAMBLE_INSTRUCTION)
        .replace("{topic}", topic)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_research_prompt_embeds_topic_and_asks_for_markdown() {
        let prompt = build_research_prompt("vector databases");
        assert!(prompt.contains("\"vector databases\""));
        assert!(prompt.contains("Markdown"));
        assert!(prompt.contains(NO_PREAMBLE_INSTRUCTION));
    }
}
