use tracing::warn;

use crate::llm::{
    build_summary_prompt, parse_embedded_json, truncate_chars, JsonPayload, ModelTier,
    TextGenerator, MAX_SPEECH_CHARS, SUMMARY_MAX_TOKENS,
};
use crate::models::SpeechAnnotation;

/// Summarize one speech and pull out up to five keywords.
///
/// Runs on the fast model since this is one call per speech. Failure is
/// absorbed here: the speech is persisted with an empty annotation rather
/// than dropped or retried.
pub async fn summarize_speech<G: TextGenerator>(
    llm: &G,
    speaker: &str,
    speech_text: &str,
) -> SpeechAnnotation {
    let text = truncate_chars(speech_text, MAX_SPEECH_CHARS);
    let prompt = build_summary_prompt(speaker, text);

    let raw = match llm.generate(ModelTier::Fast, &prompt, SUMMARY_MAX_TOKENS).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("summarization call failed for {speaker}: {e}");
            return SpeechAnnotation::default();
        }
    };

    match parse_embedded_json(&raw) {
        JsonPayload::Parsed(value) => serde_json::from_value(value).unwrap_or_else(|e| {
            warn!("summary response has unexpected shape: {e}");
            SpeechAnnotation::default()
        }),
        JsonPayload::Malformed(raw) => {
            warn!(
                "summary response was not valid JSON: {}",
                truncate_chars(&raw, 200)
            );
            SpeechAnnotation::default()
        }
    }
}
