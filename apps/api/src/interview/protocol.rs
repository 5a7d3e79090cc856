//! Delimited-section reply parser.
//!
//! The model is asked to answer in blocks introduced by `---KEY---` markers.
//! Two independent strategies are tried in turn:
//! 1. split on every `---` run and treat fragments equal to a key as section openers;
//! 2. search for each literal `---KEY---` marker and slice between markers.
//!
//! If neither finds the leading key, the reply is degraded and every key takes its default.

use std::collections::HashMap;

use thiserror::Error;

pub const DELIMITER: &str = "---";

/// Literal the model returns instead of a next question when the interview should end.
pub const END_INTERVIEW: &str = "END_INTERVIEW";

pub const FEEDBACK_KEY: &str = "FEEDBACK";
pub const NEXT_QUESTION_KEY: &str = "NEXT_QUESTION";
pub const SCORE_HINT_KEY: &str = "SCORE_HINT";
pub const SUMMARY_KEY: &str = "SUMMARY";
pub const FINAL_SCORE_KEY: &str = "FINAL_SCORE";

/// Hint recorded for a turn whose reply could not be parsed at all.
pub const ERROR_HINT: &str = "Error";

const DEFAULT_FEEDBACK: &str = "No feedback was returned by the AI.";
const DEFAULT_SCORE_HINT: &str = "Neutral";
const DEFAULT_SUMMARY: &str = "No summary was returned by the AI.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseFailed {
    #[error("no recognized section markers")]
    NoSections,

    #[error("leading section `{0}` not found")]
    MissingLeadingSection(String),
}

pub fn marker(key: &str) -> String {
    format!("{DELIMITER}{key}{DELIMITER}")
}

// ────────────────────────────────────────────────────────────────────────────
// Section parsing
// ────────────────────────────────────────────────────────────────────────────

/// Parse result with every expected key filled in.
#[derive(Debug, Clone)]
pub struct ParsedSections {
    values: HashMap<String, String>,
    pub degraded: bool,
}

impl ParsedSections {
    pub fn value(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or_default()
    }
}

/// Parses `text` into the `(key, default)` sections, in the order given.
///
/// Keys that are missing or blank take their default. When the leading key
/// cannot be found by either strategy the result is degraded and only defaults are used.
pub fn parse_sections(text: &str, expected: &[(&str, &str)]) -> ParsedSections {
    let keys: Vec<&str> = expected.iter().map(|(key, _)| *key).collect();

    match locate_sections(text, &keys) {
        Ok(found) => {
            let values = expected
                .iter()
                .map(|(key, default)| {
                    let value = found
                        .get(*key)
                        .filter(|v| !v.trim().is_empty())
                        .cloned()
                        .unwrap_or_else(|| default.to_string());
                    (key.to_string(), value)
                })
                .collect();
            ParsedSections {
                values,
                degraded: false,
            }
        }
        Err(err) => {
            tracing::warn!("Could not parse AI reply sections: {err}");
            ParsedSections {
                values: expected
                    .iter()
                    .map(|(key, default)| (key.to_string(), default.to_string()))
                    .collect(),
                degraded: true,
            }
        }
    }
}

/// Runs the tokenizer, then the marker search, and accepts the first result
/// that contains the leading key.
pub fn locate_sections(text: &str, keys: &[&str]) -> Result<HashMap<String, String>, ParseFailed> {
    let Some(leading) = keys.first() else {
        return Err(ParseFailed::NoSections);
    };
    let require_leading = |found: HashMap<String, String>| -> Result<_, ParseFailed> {
        if found.contains_key(*leading) {
            Ok(found)
        } else {
            Err(ParseFailed::MissingLeadingSection(leading.to_string()))
        }
    };

    split_on_delimiters(text, keys)
        .and_then(require_leading)
        .or_else(|err| {
            tracing::debug!("Delimiter split failed ({err}), searching for markers");
            search_markers(text, keys).and_then(require_leading)
        })
}

/// Primary strategy: every `---` run separates fragments; a fragment equal to a
/// key opens a section and following fragments are newline-joined into it.
fn split_on_delimiters(text: &str, keys: &[&str]) -> Result<HashMap<String, String>, ParseFailed> {
    let mut found = HashMap::new();
    let mut current: Option<&str> = None;
    let mut lines: Vec<&str> = Vec::new();

    for fragment in text.split(DELIMITER).map(str::trim) {
        if let Some(key) = keys.iter().find(|k| **k == fragment) {
            if let Some(open) = current.take() {
                found.insert(open.to_string(), lines.join("\n").trim().to_string());
            }
            current = Some(*key);
            lines.clear();
        } else if current.is_some() {
            lines.push(fragment);
        }
    }

    match current {
        Some(open) => {
            found.insert(open.to_string(), lines.join("\n").trim().to_string());
            Ok(found)
        }
        None => Err(ParseFailed::NoSections),
    }
}

/// Fallback strategy: find each literal `---KEY---` marker and take the text up
/// to the next marker found (by position) or the end of the reply.
///
/// Only hyphens that decorate a marker are removed: as many after a marker as
/// preceded it, and the run directly before the next marker. Content hyphens stay.
fn search_markers(text: &str, keys: &[&str]) -> Result<HashMap<String, String>, ParseFailed> {
    let mut positions: Vec<(usize, usize, &str)> = keys
        .iter()
        .filter_map(|key| {
            let marker = marker(key);
            text.find(&marker)
                .map(|start| (start, start + marker.len(), *key))
        })
        .collect();

    if positions.is_empty() {
        return Err(ParseFailed::NoSections);
    }
    positions.sort_by_key(|(start, _, _)| *start);

    let mut found = HashMap::new();
    for (i, (start, value_start, key)) in positions.iter().enumerate() {
        let next_start = positions.get(i + 1).map(|(next_start, _, _)| *next_start);
        let value_end = next_start.unwrap_or(text.len()).max(*value_start);

        let mut value = &text[*value_start..value_end];
        let decoration = hyphens_before(text, *start);
        let skip = value
            .bytes()
            .take(decoration)
            .take_while(|b| *b == b'-')
            .count();
        value = &value[skip..];
        if next_start.is_some() {
            value = value.trim_end_matches('-');
        }
        found.insert(key.to_string(), value.trim().to_string());
    }
    Ok(found)
}

/// Length of the hyphen run ending at byte `end`.
fn hyphens_before(text: &str, end: usize) -> usize {
    text[..end].bytes().rev().take_while(|b| *b == b'-').count()
}

// ────────────────────────────────────────────────────────────────────────────
// Typed replies
// ────────────────────────────────────────────────────────────────────────────

/// The model's reply to one answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub feedback: String,
    pub next_question: String,
    pub score_hint: String,
    pub degraded: bool,
}

impl TurnReply {
    pub fn parse(text: &str) -> Self {
        let sections = parse_sections(
            text,
            &[
                (FEEDBACK_KEY, DEFAULT_FEEDBACK),
                (NEXT_QUESTION_KEY, END_INTERVIEW),
                (SCORE_HINT_KEY, DEFAULT_SCORE_HINT),
            ],
        );

        if sections.degraded {
            return Self {
                feedback: format!(
                    "The AI response could not be processed. Original response:\n{text}"
                ),
                next_question: END_INTERVIEW.to_string(),
                score_hint: ERROR_HINT.to_string(),
                degraded: true,
            };
        }

        Self {
            feedback: sections.value(FEEDBACK_KEY).to_string(),
            next_question: sections.value(NEXT_QUESTION_KEY).to_string(),
            score_hint: sections.value(SCORE_HINT_KEY).to_string(),
            degraded: false,
        }
    }

    /// True when the model signalled that no further question should be asked.
    pub fn ends_interview(&self) -> bool {
        self.next_question.trim().eq_ignore_ascii_case(END_INTERVIEW)
    }
}

/// The model's closing evaluation of the whole interview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalEvaluation {
    pub summary: String,
    pub final_score: String,
    pub degraded: bool,
}

impl FinalEvaluation {
    /// Parses the final reply; `score` is the accumulated turn score used when no
    /// final score can be read.
    pub fn parse(text: &str, score: u32) -> Self {
        let fallback_score = Self::fallback_score(score);
        let sections = parse_sections(
            text,
            &[
                (SUMMARY_KEY, DEFAULT_SUMMARY),
                (FINAL_SCORE_KEY, fallback_score.as_str()),
            ],
        );

        if sections.degraded {
            return Self {
                summary: format!(
                    "The final evaluation could not be processed. Original response:\n{text}"
                ),
                final_score: fallback_score,
                degraded: true,
            };
        }

        Self {
            summary: sections.value(SUMMARY_KEY).to_string(),
            final_score: sections.value(FINAL_SCORE_KEY).to_string(),
            degraded: false,
        }
    }

    /// Used when the final evaluation call itself fails.
    pub fn unavailable(score: u32) -> Self {
        Self {
            summary: DEFAULT_SUMMARY.to_string(),
            final_score: Self::fallback_score(score),
            degraded: true,
        }
    }

    fn fallback_score(score: u32) -> String {
        format!("{score}/?")
    }
}
