//! Weighted aggregation of per-criterion scores into one bounded breakdown.
//! The fractional weighted-sum model is the only scoring model: each
//! criterion contributes `score * weight/100`, and the clamped total maps to
//! a one-decimal percentage.

use super::domain::{Criterion, ScoreBreakdown, Signal};
use super::scoring::score_criterion;

/// Whether the evaluation entry point asserts that the role's weights sum to
/// exactly 100 before scoring. The aggregation arithmetic itself never
/// enforces this; callers opt in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WeightPolicy {
    Enforce,
    #[default]
    Ignore,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("criteria weights must sum to 100, got {total}")]
    WeightTotal { total: u32 },
}

/// Sum of the configured criterion weights.
pub fn weight_total(criteria: &[Criterion]) -> u32 {
    criteria
        .iter()
        .map(|criterion| u32::from(criterion.weight))
        .sum()
}

/// Scores every criterion for one resume and packages the breakdown.
///
/// An empty criteria set yields a zero total and an empty breakdown under
/// `WeightPolicy::Ignore`; scoring itself cannot fail.
pub fn evaluate_resume(
    criteria: &[Criterion],
    resume_text: &str,
    signals: &[Signal],
    policy: WeightPolicy,
) -> Result<ScoreBreakdown, EvaluationError> {
    if policy == WeightPolicy::Enforce {
        let total = weight_total(criteria);
        if total != 100 {
            return Err(EvaluationError::WeightTotal { total });
        }
    }

    let mut criterion_scores = Vec::with_capacity(criteria.len());
    let mut weighted_total = 0.0;

    for criterion in criteria {
        let result = score_criterion(criterion, resume_text, signals);
        weighted_total += result.score * (f64::from(criterion.weight) / 100.0);
        criterion_scores.push(result);
    }

    let total_score = weighted_total.clamp(0.0, 1.0);
    let total_score_pct = (total_score * 1000.0).round() / 10.0;

    Ok(ScoreBreakdown {
        criterion_scores,
        total_score,
        total_score_pct,
    })
}
