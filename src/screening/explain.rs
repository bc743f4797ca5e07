//! Natural-language justification for why one scored resume outranks
//! another, built from two breakdowns over the same ordered criteria set.

use super::domain::ScoreBreakdown;

/// Score differences below this threshold are not worth citing.
const SIGNIFICANT_DELTA: f64 = 0.001;

/// Criteria cited in an explanation, taken from the top of the delta ranking.
const MAX_CITED_CRITERIA: usize = 2;

struct CriterionDelta<'a> {
    name: &'a str,
    left: f64,
    right: f64,
    delta: f64,
}

/// Renders a short comparison between the left ("A") and right ("B")
/// candidates. Swapping the inputs swaps the named winner but cites the same
/// criteria and magnitudes.
pub fn explain_comparison(left: &ScoreBreakdown, right: &ScoreBreakdown) -> String {
    let mut deltas: Vec<CriterionDelta<'_>> = left
        .criterion_scores
        .iter()
        .zip(&right.criterion_scores)
        .map(|(left, right)| CriterionDelta {
            name: &left.criterion_name,
            left: left.score,
            right: right.score,
            delta: left.score - right.score,
        })
        .collect();

    deltas.sort_by(|a, b| b.delta.abs().total_cmp(&a.delta.abs()));

    let header = if left.total_score > right.total_score {
        "Resume A scored higher due to: "
    } else if right.total_score > left.total_score {
        "Resume B scored higher due to: "
    } else {
        return "Both resumes scored equally. ".to_string();
    };

    let reasons: Vec<String> = deltas
        .iter()
        .take(MAX_CITED_CRITERIA)
        .filter(|delta| delta.delta.abs() > SIGNIFICANT_DELTA)
        .map(|delta| {
            format!(
                "{} (A: {:.2}, B: {:.2}, delta: {:.2})",
                delta.name, delta.left, delta.right, delta.delta
            )
        })
        .collect();

    if reasons.is_empty() {
        format!("{header}minimal differences across criteria.")
    } else {
        format!("{header}{}", reasons.join("; "))
    }
}
