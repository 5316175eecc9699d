use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::llm::TextGenerator;
use crate::models::{Meeting, NewSpeech};
use crate::pipeline::{
    extract_speeches, is_noise, match_councillor, persist_speeches, summarize_speech,
};
use crate::store::CouncilStore;

/// Meetings with less transcript than this are skipped as not yet ingested.
pub const MIN_TRANSCRIPT_CHARS: usize = 100;

/// Batch selection and re-extraction policy.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Process exactly one meeting by id.
    pub meeting_id: Option<String>,
    /// Cap on the number of meetings processed (ignored with `meeting_id`).
    pub limit: Option<u32>,
    /// Delete and regenerate speeches for already-processed meetings.
    pub force: bool,
}

/// Terminal state of one meeting's run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeetingOutcome {
    /// Speeches already exist and force was not set.
    AlreadyProcessed,
    /// Transcript absent or below [`MIN_TRANSCRIPT_CHARS`].
    NoTranscript,
    /// Extraction failed or returned zero candidates.
    NoCandidates,
    /// Candidates existed but not a single row was persisted.
    NothingSaved,
    Done { saved: usize, candidates: usize },
}

impl MeetingOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            MeetingOutcome::AlreadyProcessed | MeetingOutcome::Done { .. }
        )
    }
}

/// Final tally reported after the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failed: usize,
    pub total: usize,
}

/// Run the extraction pipeline for one meeting.
///
/// Extraction happens at most once per meeting; under `force` the existing
/// rows are deleted only after a fresh extraction produced candidates, so
/// a failed extraction never wipes prior data. The delete-then-insert is
/// not transactional; a crash in between leaves the meeting empty until
/// the next run.
pub async fn process_meeting<S: CouncilStore, G: TextGenerator>(
    store: &S,
    llm: &G,
    meeting: &Meeting,
    force: bool,
) -> Result<MeetingOutcome> {
    if !force && store.has_speeches(&meeting.id).await? {
        info!("already processed (use --force to re-extract)");
        return Ok(MeetingOutcome::AlreadyProcessed);
    }

    if meeting.transcript().chars().count() < MIN_TRANSCRIPT_CHARS {
        warn!("no transcript available");
        return Ok(MeetingOutcome::NoTranscript);
    }

    let candidates = match extract_speeches(llm, meeting).await {
        Ok(candidates) => candidates,
        Err(e) => {
            error!("extraction failed: {e:#}");
            return Ok(MeetingOutcome::NoCandidates);
        }
    };

    if candidates.is_empty() {
        error!("extractor returned no speeches");
        return Ok(MeetingOutcome::NoCandidates);
    }
    info!("extracted {} speeches", candidates.len());

    if force {
        store.delete_speeches(&meeting.id).await?;
        info!("deleted existing speeches");
    }

    let mut rows = Vec::with_capacity(candidates.len());
    for candidate in &candidates {
        if is_noise(candidate) {
            debug!("skipping speech #{}: too short", candidate.order);
            continue;
        }

        let councillor_id = match_councillor(store, &candidate.speaker).await;
        info!(
            "summarizing speech #{} by {}",
            candidate.order, candidate.speaker
        );
        let annotation = summarize_speech(llm, &candidate.speaker, &candidate.text).await;

        let now = Utc::now();
        rows.push(NewSpeech {
            meeting_id: meeting.id.clone(),
            councillor_id,
            speech_order: candidate.order,
            speech_text: candidate.text.clone(),
            summary: annotation.summary,
            keywords: annotation.keywords,
            created_at: now,
            updated_at: now,
        });
    }

    let saved = persist_speeches(store, &rows).await;

    if saved > 0 {
        Ok(MeetingOutcome::Done {
            saved,
            candidates: candidates.len(),
        })
    } else {
        Ok(MeetingOutcome::NothingSaved)
    }
}

/// Select eligible meetings and process them strictly sequentially.
///
/// One meeting's failure, including an unexpected store error, is counted
/// and logged without aborting the rest of the batch.
pub async fn run_batch<S: CouncilStore, G: TextGenerator>(
    store: &S,
    llm: &G,
    options: &RunOptions,
) -> Result<BatchReport> {
    let meetings = if let Some(id) = &options.meeting_id {
        store.meeting_by_id(id).await?.into_iter().collect()
    } else {
        store.meetings_with_transcript(options.limit).await?
    };

    if meetings.is_empty() {
        warn!("no meetings found to process");
        return Ok(BatchReport::default());
    }
    info!("found {} meetings to process", meetings.len());

    let mut report = BatchReport {
        total: meetings.len(),
        ..Default::default()
    };

    for (i, meeting) in meetings.iter().enumerate() {
        info!("[{}/{}] {}", i + 1, meetings.len(), meeting.title);

        match process_meeting(store, llm, meeting, options.force).await {
            Ok(outcome) if outcome.is_success() => report.succeeded += 1,
            Ok(outcome) => {
                debug!("meeting {} failed: {outcome:?}", meeting.id);
                report.failed += 1;
            }
            Err(e) => {
                error!("unexpected error: {e:#}");
                report.failed += 1;
            }
        }
    }

    info!(
        "extraction complete: {} succeeded, {} failed, {} total",
        report.succeeded, report.failed, report.total
    );

    Ok(report)
}
