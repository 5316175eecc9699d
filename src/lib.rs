pub mod llm;
pub mod models;
pub mod pipeline;
pub mod store;

pub use llm::{
    parse_embedded_json, AnthropicClient, AnthropicConfig, JsonPayload, LlmError, ModelTier,
    TextGenerator,
};
pub use models::{Councillor, Meeting, NewSpeech, SpeechAnnotation, SpeechCandidate};
pub use pipeline::{process_meeting, run_batch, BatchReport, MeetingOutcome, RunOptions};
pub use store::{CouncilStore, PostgrestStore, StoreConfig, StoreError};
