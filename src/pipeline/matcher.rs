use tracing::debug;

use crate::store::CouncilStore;

/// Role honorifics appended to speaker labels in council transcripts.
/// Longest first so "부의장" is not left as a dangling "부".
const ROLE_SUFFIXES: [&str; 3] = ["부의장", "의장", "의원"];

/// Strip role honorifics from a speaker label, leaving the bare name.
pub fn bare_name(speaker: &str) -> String {
    let mut name = speaker.to_string();
    for suffix in ROLE_SUFFIXES {
        name = name.replace(suffix, "");
    }
    name.trim().to_string()
}

/// Resolve a speaker label to a councillor id by substring containment.
///
/// Read-only and non-fatal: a lookup error or a miss both yield `None`,
/// and the speech is persisted with a null councillor reference. When
/// several councillor names contain the bare name the store returns an
/// arbitrary one; no tie-break is applied.
pub async fn match_councillor<S: CouncilStore>(store: &S, speaker: &str) -> Option<String> {
    let name = bare_name(speaker);
    if name.is_empty() {
        return None;
    }

    match store.find_councillor(&name).await {
        Ok(Some(councillor)) => Some(councillor.id),
        Ok(None) => {
            debug!("no councillor matched '{name}'");
            None
        }
        Err(e) => {
            debug!("councillor lookup for '{name}' failed: {e}");
            None
        }
    }
}
