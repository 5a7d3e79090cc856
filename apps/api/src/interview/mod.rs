// Mock interview engine.
// Implements: session state, history reconstruction, prompt building, reply parsing, scoring.
// All LLM calls go through llm_client — no direct Gemini calls here.

pub mod handlers;
pub mod prompts;
pub mod protocol;
pub mod scoring;
pub mod service;
pub mod session;
