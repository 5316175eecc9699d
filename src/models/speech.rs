use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One speaker turn as returned by the extraction model.
///
/// Transient: produced per meeting, enriched and persisted immediately,
/// never stored in this shape. Ordinals are 1-based in the order the model
/// emits them; gaps or duplicates are not rejected at this layer.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechCandidate {
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub text: String,
}

/// Summary and keywords produced for a single speech.
///
/// Defaults to empty on any summarization failure; a speech is never
/// dropped because its annotation could not be generated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpeechAnnotation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// A fully enriched speech row ready for insertion into the `speeches` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewSpeech {
    pub meeting_id: String,
    /// None when the speaker label matched no councillor.
    pub councillor_id: Option<String>,
    pub speech_order: u32,
    pub speech_text: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_missing_fields_default() {
        let candidate: SpeechCandidate = serde_json::from_str(r#"{"speaker": "홍길동 의원"}"#).unwrap();
        assert_eq!(candidate.order, 0);
        assert_eq!(candidate.speaker, "홍길동 의원");
        assert!(candidate.text.is_empty());
    }

    #[test]
    fn test_annotation_defaults_empty() {
        let annotation = SpeechAnnotation::default();
        assert!(annotation.summary.is_empty());
        assert!(annotation.keywords.is_empty());
    }
}
