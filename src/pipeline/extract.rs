use anyhow::Result;
use serde::Deserialize;
use tracing::debug;

use crate::llm::{
    build_extraction_prompt, parse_embedded_json, truncate_chars, JsonPayload, ModelTier,
    TextGenerator, EXTRACTION_MAX_TOKENS, MAX_TRANSCRIPT_CHARS,
};
use crate::models::{Meeting, SpeechCandidate};

/// Expected shape of the extraction response. A missing `speeches` field
/// parses as an empty list, which the orchestrator treats as an extraction
/// failure rather than a crash.
#[derive(Debug, Deserialize)]
struct ExtractionResponse {
    #[serde(default)]
    speeches: Vec<SpeechCandidate>,
}

/// Segment a meeting transcript into attributed speech candidates.
///
/// One call to the primary model per meeting. The transcript is truncated
/// to [`MAX_TRANSCRIPT_CHARS`] before transmission. Errors here are local
/// to the meeting: the orchestrator logs them and moves on, and the call
/// is never retried (only the client-level 429 backoff applies).
pub async fn extract_speeches<G: TextGenerator>(
    llm: &G,
    meeting: &Meeting,
) -> Result<Vec<SpeechCandidate>> {
    let transcript = truncate_chars(meeting.transcript(), MAX_TRANSCRIPT_CHARS);
    let prompt = build_extraction_prompt(&meeting.title, transcript);

    let raw = llm
        .generate(ModelTier::Primary, &prompt, EXTRACTION_MAX_TOKENS)
        .await?;
    debug!("extraction response: {}...", truncate_chars(&raw, 500));

    match parse_embedded_json(&raw) {
        JsonPayload::Parsed(value) => {
            let response: ExtractionResponse = serde_json::from_value(value)
                .map_err(|e| anyhow::anyhow!("extraction response has unexpected shape: {e}"))?;
            Ok(response.speeches)
        }
        JsonPayload::Malformed(raw) => anyhow::bail!(
            "extraction response was not valid JSON: {}",
            truncate_chars(&raw, 200)
        ),
    }
}
