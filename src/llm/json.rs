//! Extracting a JSON object from model prose.
//!
//! The prompts forbid surrounding text, but models still wrap the payload
//! in a fenced code block often enough that parsing must tolerate it.

/// Outcome of attempting to read a JSON value out of a model response.
/// Callers branch on this explicitly instead of treating parse failures
/// as exceptional control flow.
#[derive(Debug, Clone)]
pub enum JsonPayload {
    Parsed(serde_json::Value),
    /// The original, unstripped response text, kept for logging.
    Malformed(String),
}

impl JsonPayload {
    pub fn is_parsed(&self) -> bool {
        matches!(self, JsonPayload::Parsed(_))
    }
}

/// Strip a surrounding fenced code block (```json-tagged or bare) and parse
/// the remainder as JSON. An unterminated fence is tolerated: everything
/// after the opening delimiter is taken.
pub fn parse_embedded_json(raw: &str) -> JsonPayload {
    let body = if let Some((_, after)) = raw.split_once("```json") {
        after.split_once("```").map(|(inner, _)| inner).unwrap_or(after)
    } else if let Some((_, after)) = raw.split_once("```") {
        after.split_once("```").map(|(inner, _)| inner).unwrap_or(after)
    } else {
        raw
    };

    match serde_json::from_str(body.trim()) {
        Ok(value) => JsonPayload::Parsed(value),
        Err(_) => JsonPayload::Malformed(raw.to_string()),
    }
}
