//! Prompt construction for extraction and summarization calls.

/// Character budget for a transcript sent to the extraction call.
pub const MAX_TRANSCRIPT_CHARS: usize = 50_000;
/// Character budget for a single speech sent to the summarization call.
pub const MAX_SPEECH_CHARS: usize = 5_000;

/// Output token caps per call type.
pub const EXTRACTION_MAX_TOKENS: u32 = 8_000;
pub const SUMMARY_MAX_TOKENS: u32 = 1_000;

/// Truncate to at most `max` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the per-meeting extraction prompt. The transcript passed in must
/// already be truncated to [`MAX_TRANSCRIPT_CHARS`].
pub fn build_extraction_prompt(title: &str, transcript: &str) -> String {
    format!(
        r#"다음은 용인시의회 "{title}" 회의록 전문입니다.

이 회의록에서 각 의원의 발언을 추출하여 JSON 형식으로 정리해주세요.

요구사항:
1. 각 발언자의 이름과 발언 내용을 추출
2. 발언 순서대로 정렬
3. 의장, 부의장, 각 의원의 발언을 모두 포함
4. 발언자 이름은 "○○○ 의원", "○○○ 의장" 형식으로 표기
5. 발언 내용은 원문 그대로 유지

출력 형식:
{{
  "speeches": [
    {{
      "order": 1,
      "speaker": "홍길동 의장",
      "text": "개회를 선포합니다..."
    }},
    {{
      "order": 2,
      "speaker": "김철수 의원",
      "text": "질의하겠습니다..."
    }}
  ]
}}

회의록:
{transcript}

위 형식에 맞춰 JSON만 출력해주세요. 다른 설명은 필요 없습니다."#
    )
}

/// Build the per-speech summary prompt. The speech text passed in must
/// already be truncated to [`MAX_SPEECH_CHARS`].
pub fn build_summary_prompt(speaker: &str, speech_text: &str) -> String {
    format!(
        r#"다음은 "{speaker}"의 의회 발언입니다.

발언 내용:
{speech_text}

이 발언을 분석하여 다음을 제공해주세요:
1. 핵심 요약 (2-3문장, 200자 이내)
2. 주요 키워드 (최대 5개)

출력 형식:
{{
  "summary": "발언 요약...",
  "keywords": ["키워드1", "키워드2", "키워드3"]
}}

JSON만 출력해주세요."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_budget() {
        assert_eq!(truncate_chars("안녕하세요", 10), "안녕하세요");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Hangul is 3 bytes per char; a byte-based cut would panic or
        // return the wrong length.
        let text = "가".repeat(100);
        let cut = truncate_chars(&text, 40);
        assert_eq!(cut.chars().count(), 40);
    }

    #[test]
    fn test_truncate_at_exact_boundary() {
        assert_eq!(truncate_chars("abcde", 5), "abcde");
        assert_eq!(truncate_chars("abcde", 4), "abcd");
    }

    #[test]
    fn test_extraction_prompt_contains_title_and_transcript() {
        let prompt = build_extraction_prompt("제280회 본회의", "의장 개회를 선포합니다.");
        assert!(prompt.contains("제280회 본회의"));
        assert!(prompt.contains("개회를 선포합니다"));
        assert!(prompt.contains("\"speeches\""));
    }

    #[test]
    fn test_transcript_truncation_drops_tail() {
        let transcript = format!("{}TAILMARKER", "a".repeat(MAX_TRANSCRIPT_CHARS));
        let truncated = truncate_chars(&transcript, MAX_TRANSCRIPT_CHARS);
        let prompt = build_extraction_prompt("본회의", truncated);
        assert!(!prompt.contains("TAILMARKER"));
    }

    #[test]
    fn test_speech_truncation_drops_tail() {
        let speech = format!("{}TAILMARKER", "나".repeat(MAX_SPEECH_CHARS));
        let truncated = truncate_chars(&speech, MAX_SPEECH_CHARS);
        let prompt = build_summary_prompt("홍길동 의원", truncated);
        assert!(!prompt.contains("TAILMARKER"));
        assert!(prompt.contains("홍길동 의원"));
    }
}
