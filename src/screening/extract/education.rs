use once_cell::sync::Lazy;
use regex::Regex;

use super::context_snippet;
use crate::screening::domain::{Confidence, EducationLevel, Signal, SignalKind};

/// Degree token patterns ordered from strongest qualification to weakest.
/// Resumes list their highest degree, so the scan stops at the first hit;
/// that keeps bachelor's text inside a master's-program description from
/// being read as the candidate's level.
static DEGREE_PATTERNS: Lazy<Vec<(EducationLevel, Regex)>> = Lazy::new(|| {
    [
        (
            EducationLevel::Phd,
            r"(?i)\b(PhD|Ph\.D\.|Doctor|Doctorate)\b",
        ),
        (
            EducationLevel::Master,
            r"(?i)\b(Master|M\.S\.|M\.A\.|MS|MA)\b",
        ),
        (
            EducationLevel::Bachelor,
            r"(?i)\b(Bachelor|B\.S\.|B\.A\.|BS|BA|B\.Sc\.)\b",
        ),
        (
            EducationLevel::Associate,
            r"(?i)\b(Associate|A\.S\.|AA|A\.A\.)\b",
        ),
        (EducationLevel::Hs, r"(?i)\b(High School|HS|H\.S\.)\b"),
    ]
    .into_iter()
    .map(|(level, pattern)| {
        (
            level,
            Regex::new(pattern).expect("degree pattern compiles"),
        )
    })
    .collect()
});

/// Scans the original text for the strongest degree token.
pub(super) fn detect_education_level(text: &str) -> Signal {
    for (level, pattern) in DEGREE_PATTERNS.iter() {
        if let Some(found) = pattern.find(text) {
            return Signal {
                kind: SignalKind::EducationLevelEstimate,
                value: level.label().to_string(),
                evidence_snippet: context_snippet(text, found.start(), found.end()),
                confidence: Confidence::High,
            };
        }
    }

    Signal {
        kind: SignalKind::EducationLevelEstimate,
        value: "UNKNOWN".to_string(),
        evidence_snippet: "No education token detected".to_string(),
        confidence: Confidence::Low,
    }
}
