use super::context_snippet;
use crate::screening::domain::{Confidence, Signal, SignalKind};
use crate::screening::normalize::normalize;

/// Substring containment over normalized text, one signal per matched
/// keyword. The caller supplies `normalized_text` so a single normalization
/// pass serves the whole keyword list; the evidence snippet is cut from the
/// original text around the first occurrence.
pub fn extract_keyword_matches(
    text: &str,
    normalized_text: &str,
    keywords: &[String],
) -> Vec<Signal> {
    let mut signals = Vec::new();

    for keyword in keywords {
        let normalized_keyword = normalize(keyword);
        if normalized_keyword.is_empty() {
            continue;
        }

        if let Some(index) = normalized_text.find(&normalized_keyword) {
            signals.push(Signal {
                kind: SignalKind::KeywordMatch,
                value: keyword.clone(),
                evidence_snippet: context_snippet(
                    text,
                    index,
                    index + normalized_keyword.len(),
                ),
                confidence: Confidence::High,
            });
        }
    }

    signals
}
