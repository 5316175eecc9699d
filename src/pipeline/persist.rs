use tracing::{debug, error, info};

use crate::models::{NewSpeech, SpeechCandidate};
use crate::store::CouncilStore;

/// Candidates with less text than this are extraction noise, not speeches.
pub const MIN_SPEECH_CHARS: usize = 10;

/// Whether a candidate is too short to persist.
pub fn is_noise(candidate: &SpeechCandidate) -> bool {
    candidate.text.trim().is_empty() || candidate.text.chars().count() < MIN_SPEECH_CHARS
}

/// Insert enriched speech rows one by one. Each insert is independent: a
/// failure is logged and counted against the row only, never aborting the
/// remainder of the meeting. Returns the number of rows saved.
pub async fn persist_speeches<S: CouncilStore>(store: &S, rows: &[NewSpeech]) -> usize {
    let mut saved = 0;

    for row in rows {
        match store.insert_speech(row).await {
            Ok(()) => {
                saved += 1;
                debug!("saved speech #{}", row.speech_order);
            }
            Err(e) => {
                error!("failed to save speech #{}: {e}", row.speech_order);
            }
        }
    }

    if saved > 0 {
        info!("saved {saved}/{} speeches", rows.len());
    }
    saved
}
