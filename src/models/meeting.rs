use serde::Deserialize;

/// A council session record as stored in the `meetings` table.
///
/// The pipeline only reads meetings; the transcript is populated by a
/// separate ingestion step and may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub transcript_text: Option<String>,
}

impl Meeting {
    /// The transcript body, or an empty string when none has been ingested yet.
    pub fn transcript(&self) -> &str {
        self.transcript_text.as_deref().unwrap_or("")
    }
}
