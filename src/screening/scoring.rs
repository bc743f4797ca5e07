//! Per-criterion scoring over normalized text and previously extracted
//! signals. Every path returns a score in [0.0, 1.0] with evidence strings a
//! reviewer can audit; missing signals read as the weakest possible evidence,
//! never as an error.

use super::criteria::CriterionConfig;
use super::domain::{Criterion, CriterionScoreResult, EducationLevel, Signal, SignalKind};
use super::extract::context_snippet;
use super::normalize::normalize;

/// Evidence entries kept per criterion.
const MAX_EVIDENCE_ENTRIES: usize = 3;

/// Scores a single criterion against one resume.
///
/// Keyword variants scan the resume text directly; the experience and
/// education variants read the resume's persisted signals.
pub fn score_criterion(
    criterion: &Criterion,
    resume_text: &str,
    signals: &[Signal],
) -> CriterionScoreResult {
    let (score, evidence) = match &criterion.config {
        CriterionConfig::KeywordSkill(config) => {
            score_keywords(&config.required_keywords, resume_text)
        }
        CriterionConfig::CustomKeywords(config) => score_keywords(&config.keywords, resume_text),
        CriterionConfig::ExperienceYears(config) => {
            score_experience(config.required_years, signals)
        }
        CriterionConfig::EducationLevel(config) => {
            score_education(config.minimum_level, signals)
        }
    };

    CriterionScoreResult {
        criterion_id: criterion.id.clone(),
        criterion_name: criterion.name.clone(),
        weight: criterion.weight,
        score,
        evidence,
    }
}

/// Fractional coverage: matched / configured. `matchMode` does not change the
/// arithmetic; `ALL` scores the same fractional credit as `ANY`.
fn score_keywords(keywords: &[String], resume_text: &str) -> (f64, Vec<String>) {
    if keywords.is_empty() {
        return (0.0, Vec::new());
    }

    let normalized_text = normalize(resume_text);
    let mut matched = Vec::new();
    for keyword in keywords {
        let normalized_keyword = normalize(keyword);
        if !normalized_keyword.is_empty() && normalized_text.contains(&normalized_keyword) {
            matched.push((keyword.as_str(), normalized_keyword));
        }
    }

    let score = (matched.len() as f64 / keywords.len() as f64).clamp(0.0, 1.0);

    let mut evidence = Vec::new();
    for (keyword, normalized_keyword) in matched.iter().take(MAX_EVIDENCE_ENTRIES) {
        if let Some(index) = normalized_text.find(normalized_keyword.as_str()) {
            let snippet = context_snippet(resume_text, index, index + normalized_keyword.len());
            evidence.push(format!("Matched keyword '{keyword}': {snippet}"));
        }
    }

    (score, evidence)
}

/// Linear credit toward the required years, capped at full marks. A zero
/// requirement is trivially satisfied.
fn score_experience(required_years: f64, signals: &[Signal]) -> (f64, Vec<String>) {
    if required_years == 0.0 {
        return (1.0, Vec::new());
    }

    let candidate_years = signals
        .iter()
        .find(|signal| signal.kind == SignalKind::ExperienceYearsEstimate)
        .and_then(|signal| signal.value.parse::<f64>().ok())
        .unwrap_or(0.0);

    let mut evidence: Vec<String> = signals
        .iter()
        .filter(|signal| signal.kind == SignalKind::DateRange)
        .take(MAX_EVIDENCE_ENTRIES)
        .map(|signal| signal.evidence_snippet.clone())
        .collect();
    if evidence.is_empty() {
        evidence.push("No date ranges detected in resume".to_string());
    }

    let score = (candidate_years / required_years).min(1.0);
    (score, evidence)
}

/// Full marks once the candidate meets the bar, proportional partial credit
/// below it on the fixed ordinal scale.
fn score_education(minimum_level: EducationLevel, signals: &[Signal]) -> (f64, Vec<String>) {
    let mut evidence = Vec::new();

    let candidate_level = signals
        .iter()
        .find(|signal| signal.kind == SignalKind::EducationLevelEstimate)
        .map(|signal| {
            if !signal.evidence_snippet.is_empty() {
                evidence.push(signal.evidence_snippet.clone());
            }
            EducationLevel::from_label(&signal.value)
        })
        .unwrap_or(EducationLevel::Unknown);

    if evidence.is_empty() {
        evidence.push("No education token detected".to_string());
    }

    let required = minimum_level.ordinal();
    let candidate = candidate_level.ordinal();
    let score = if candidate >= required {
        1.0
    } else {
        candidate / required
    };

    (score, evidence)
}
