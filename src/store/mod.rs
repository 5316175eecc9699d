pub mod postgrest;

pub use postgrest::*;

use thiserror::Error;

use crate::models::{Councillor, Meeting, NewSpeech};

/// Errors from the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("store returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// The record-store seam consumed by the pipeline. Mirrors exactly the
/// operations the pipeline needs: meeting selection, councillor lookup by
/// name fragment, speech existence check, insert, and per-meeting delete.
///
/// The production implementation is [`PostgrestStore`]; tests substitute
/// in-memory fakes.
#[allow(async_fn_in_trait)]
pub trait CouncilStore {
    async fn meeting_by_id(&self, id: &str) -> Result<Option<Meeting>, StoreError>;

    /// Meetings with a non-null transcript, newest first, optionally capped.
    async fn meetings_with_transcript(&self, limit: Option<u32>)
    -> Result<Vec<Meeting>, StoreError>;

    /// First councillor whose name contains `name_fragment`
    /// (case-insensitive). Ties are not broken deterministically.
    async fn find_councillor(&self, name_fragment: &str)
    -> Result<Option<Councillor>, StoreError>;

    /// Whether at least one speech row references the meeting. This derived
    /// query is the single source of truth for "already processed".
    async fn has_speeches(&self, meeting_id: &str) -> Result<bool, StoreError>;

    async fn insert_speech(&self, speech: &NewSpeech) -> Result<(), StoreError>;

    async fn delete_speeches(&self, meeting_id: &str) -> Result<(), StoreError>;
}
