// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Asks the model to highlight important terms with Markdown bold.
pub const EMPHASIS_INSTRUCTION: &str =
    "Use **bold formatting** for important technical terms where it helps.";

/// Forbids conversational wrapping around the requested content.
pub const NO_PREAMBLE_INSTRUCTION: &str =
    "Return only the requested content, with no introduction and no closing remarks.";
