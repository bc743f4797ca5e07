//! Ingestion-time extraction of typed signals from raw resume text.
//!
//! Date and education patterns run against the original, case-preserving text
//! so evidence snippets can be cut at the match site; only keyword containment
//! works on the normalized form. Extraction never fails: malformed fragments
//! are dropped per candidate and "nothing found" degrades to a low-confidence
//! signal with explanatory evidence text.

mod dates;
mod education;
mod keywords;

pub use keywords::extract_keyword_matches;

use chrono::NaiveDate;

use super::domain::Signal;

/// Characters of context kept on each side of a match when cutting an
/// evidence snippet.
pub(crate) const SNIPPET_CONTEXT: usize = 40;

/// Full extraction pass over one resume.
///
/// `today` resolves `Present`/`Current` end dates, so two runs with the same
/// text and reference date produce identical signals.
pub fn extract_signals(text: &str, today: NaiveDate) -> Vec<Signal> {
    let mut signals = dates::extract_date_signals(text, today);
    signals.push(education::detect_education_level(text));
    signals
}

/// Cuts a context window around `[start, end)` from `text`, clamped to the
/// text bounds and snapped to char boundaries. Indices that drifted out of
/// range (e.g. positions located in normalized text) degrade to a clamped
/// window rather than failing.
pub(crate) fn context_snippet(text: &str, start: usize, end: usize) -> String {
    let mut from = start.min(text.len()).saturating_sub(SNIPPET_CONTEXT);
    while !text.is_char_boundary(from) {
        from -= 1;
    }

    let mut to = end.min(text.len()).saturating_add(SNIPPET_CONTEXT).min(text.len());
    while !text.is_char_boundary(to) {
        to += 1;
    }

    text[from..to.max(from)].trim().to_string()
}
